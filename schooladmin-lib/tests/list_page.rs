mod common;

use std::sync::Arc;
use std::time::Duration;

use common::FixtureClasses;
use common::FixtureSource;
use common::next_list_update;
use schooladmin_lib::api::query::Direction;
use schooladmin_lib::error::ApiError;
use schooladmin_lib::error::Error;
use schooladmin_lib::model::ClassRef;
use schooladmin_lib::model::Student;
use schooladmin_lib::model::Teacher;
use schooladmin_lib::page::ListPage;
use schooladmin_lib::page::ListRecord;
use schooladmin_lib::page::MemoryHistory;
use schooladmin_lib::page::PageConfig;
use schooladmin_lib::page::Update;
use schooladmin_lib::session::Role;
use schooladmin_lib::session::Session;
use schooladmin_lib::view::ALL_CLASSES;
use schooladmin_lib::view::Cell;
use schooladmin_lib::view::PageAction;
use schooladmin_lib::view::RowAction;

fn student(id: &str, name: &str) -> Student {
    let mut student = Student::new(name);
    student.object_id = Some(id.to_string());
    student
}

fn teacher(id: &str, name: &str) -> Teacher {
    let mut teacher = Teacher::new(name);
    teacher.id = Some(id.into());
    teacher
}

fn open<R: ListRecord>(
    role: Role,
    source: &Arc<FixtureSource<R>>,
    classes: Arc<FixtureClasses>,
    history: &Arc<MemoryHistory>,
    query: &str,
) -> ListPage<R> {
    ListPage::new(
        PageConfig::new(Session::new(role)),
        source.clone(),
        classes,
        history.clone(),
        query,
    )
}

#[tokio::test(start_paused = true)]
async fn test_mount_loads_first_page_and_classes() {
    let source = FixtureSource::new();
    source.respond(vec![student("s1", "Ann"), student("s2", "Bo")], 25);
    let history = Arc::new(MemoryHistory::new());
    let classes = FixtureClasses::ok(vec![ClassRef::new("c1", "1A")]);
    let mut page: ListPage<Student> = open(Role::Admin, &source, classes, &history, "");

    page.mount();
    assert!(page.is_loading());
    assert!(page.classes_loading());

    let mut updates = vec![page.next_update().await, page.next_update().await];
    updates.retain(|u| *u != Update::ClassesLoaded);
    assert_eq!(updates, vec![Update::Loaded]);

    assert!(!page.is_loading());
    assert_eq!(page.records().len(), 2);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.pagination().pages.len(), 3);
    assert_eq!(page.class_options().len(), 2);
    assert_eq!(page.title(), "All Students");
    assert_eq!(
        history.current().as_deref(),
        Some("/list/students?page=1&sort=name%3Aasc")
    );

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].page, 1);
    assert_eq!(requests[0].limit, 10);
    assert_eq!(requests[0].sort.to_string(), "name:asc");
    assert_eq!(requests[0].search, None);
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_is_not_an_error() {
    let source = FixtureSource::new();
    source.respond(Vec::new(), 0);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    assert!(page.records().is_empty());
    assert!(page.table().is_empty());
    assert_eq!(page.total_pages(), 1);
    assert_eq!(page.error(), None);

    let pagination = page.pagination();
    assert!(pagination.prev.disabled);
    assert!(pagination.next.disabled);
}

#[tokio::test(start_paused = true)]
async fn test_error_envelope_keeps_rows() {
    let source = FixtureSource::new();
    source
        .respond(vec![student("s1", "Ann"), student("s2", "Bo")], 2)
        .fail(Error::from(ApiError::envelope("boom")));
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    page.refresh();
    assert_eq!(next_list_update(&mut page).await, Update::Failed);
    assert_eq!(page.error(), Some("boom"));
    assert_eq!(page.records().len(), 2);
    assert!(!page.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_status_error_is_normalized() {
    let source = FixtureSource::<Teacher>::new();
    source.fail(Error::from(ApiError::http(500, "Internal Server Error")));
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Failed);
    assert_eq!(page.error(), Some("Failed to fetch teachers (HTTP 500)"));
}

#[tokio::test(start_paused = true)]
async fn test_error_clears_on_next_fetch() {
    let source = FixtureSource::new();
    source
        .fail(Error::from(ApiError::envelope("boom")))
        .respond(vec![student("s1", "Ann")], 1);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Failed);

    page.refresh();
    assert_eq!(page.error(), None);
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert_eq!(page.records().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_never_overwrites_newer() {
    let source = FixtureSource::new();
    source
        .respond_after(Duration::from_secs(1), vec![student("old", "Old")], 20)
        .respond_after(Duration::from_millis(10), vec![student("new", "New")], 20);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    // Let the first fetch start before superseding it.
    tokio::task::yield_now().await;
    page.go_to_page(2);

    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert_eq!(page.records()[0].name, "New");
    assert_eq!(page.query().page(), 2);

    let late = tokio::time::timeout(Duration::from_secs(5), next_list_update(&mut page)).await;
    assert!(late.is_err(), "superseded fetch must not update the page");
    assert_eq!(page.records()[0].name, "New");
}

#[tokio::test(start_paused = true)]
async fn test_header_clicks_toggle_sort() {
    let source = FixtureSource::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "page=3");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    // Phone
    assert!(page.click_header(3));
    assert_eq!(page.query().sort().to_string(), "phone:asc");
    assert_eq!(page.query().page(), 1);
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    assert!(page.click_header(3));
    assert_eq!(page.query().sort().to_string(), "phone:desc");
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert_eq!(page.table().headers[3].sorted, Some(Direction::Desc));
    assert_eq!(page.table().headers[0].sorted, None);

    // Actions has no sort key
    assert!(!page.click_header(5));
    assert_eq!(page.query().sort().to_string(), "phone:desc");

    let last = source.requests().pop().unwrap();
    assert_eq!(last.sort.to_string(), "phone:desc");
    assert_eq!(
        history.current().as_deref(),
        Some("/list/students?page=1&sort=phone%3Adesc")
    );
}

#[tokio::test(start_paused = true)]
async fn test_shared_link_reproduces_view() {
    let source = FixtureSource::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(
        Role::Admin,
        &source,
        FixtureClasses::ok(vec![ClassRef::new("5", "5A")]),
        &history,
        "page=2&sort=phone:desc&search=ann&class=5",
    );
    assert_eq!(page.search_input(), "ann");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert_eq!(
        history.current().as_deref(),
        Some("/list/students?page=2&sort=phone%3Adesc&search=ann&class=5")
    );

    let request = &source.requests()[0];
    assert_eq!(request.page, 2);
    assert_eq!(request.search.as_deref(), Some("ann"));
    assert!(request.query_pairs().contains(&("classes", "5".to_string())));

    page.select_class("");
    assert_eq!(
        history.current().as_deref(),
        Some("/list/students?page=1&sort=phone%3Adesc&search=ann")
    );
}

#[tokio::test(start_paused = true)]
async fn test_teacher_class_filter_param() {
    let source = FixtureSource::<Teacher>::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "classId=7");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    let request = &source.requests()[0];
    assert_eq!(request.limit, 6);
    assert!(request.query_pairs().contains(&("classId", "7".to_string())));
    assert_eq!(
        history.current().as_deref(),
        Some("/list/teachers?page=1&sort=name%3Aasc&class=7")
    );
}

#[tokio::test(start_paused = true)]
async fn test_class_failure_leaves_only_all_classes() {
    let source = FixtureSource::<Student>::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::failing(), &history, "");

    page.mount();
    loop {
        if page.next_update().await == Update::ClassesLoaded {
            break;
        }
    }

    assert!(!page.classes_loading());
    let options = page.class_options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, ALL_CLASSES);
    assert_eq!(options[0].value, "");
    assert!(options[0].selected);
}

#[tokio::test(start_paused = true)]
async fn test_non_admin_sees_view_only() {
    let source = FixtureSource::new();
    source.respond(vec![teacher("t1", "Maria")], 1);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Teacher> = open(Role::Teacher, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    assert!(page.page_actions().is_empty());
    let table = page.table();
    let actions = table.rows[0].cells.last().unwrap();
    assert_eq!(
        *actions,
        Cell::Actions(vec![RowAction::View {
            href: "/list/teachers/t1".to_string()
        }])
    );
}

#[tokio::test(start_paused = true)]
async fn test_admin_gets_create_and_delete() {
    let source = FixtureSource::new();
    source.respond(vec![teacher("t1", "Maria")], 1);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Teacher> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    assert_eq!(page.page_actions(), vec![PageAction::Create { table: "teacher" }]);
    let table = page.table();
    let Cell::Actions(actions) = table.rows[0].cells.last().unwrap() else {
        panic!("last cell should hold actions");
    };
    assert_eq!(actions.len(), 2);
    assert_eq!(
        actions[1],
        RowAction::Delete {
            table: "teacher",
            id: "t1".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_fetches_once() {
    let source = FixtureSource::<Student>::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "page=3");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    for text in ["a", "an", "ann"] {
        page.set_search(text);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(page.search_input(), "ann");
    assert_eq!(page.query().search(), None);

    assert_eq!(next_list_update(&mut page).await, Update::SearchSettled);
    assert_eq!(page.query().search(), Some("ann"));
    assert_eq!(page.query().page(), 1);
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    let searches: Vec<_> = source
        .requests()
        .into_iter()
        .filter_map(|r| r.search.map(|s| (s, r.page)))
        .collect();
    assert_eq!(searches, vec![("ann".to_string(), 1)]);

    let more = tokio::time::timeout(Duration::from_secs(5), page.next_update()).await;
    assert!(more.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_settle_search_skips_the_wait() {
    let source = FixtureSource::<Student>::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    page.set_search("bo");
    page.settle_search();
    assert_eq!(page.query().search(), Some("bo"));
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    // The debouncer settles on the same text later without another fetch.
    let more = tokio::time::timeout(Duration::from_secs(2), page.next_update()).await;
    assert!(more.is_err());
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_after_settle_propagates() {
    let source = FixtureSource::<Student>::new();
    let history = Arc::new(MemoryHistory::new());
    let mut page = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    page.set_search("ann");
    page.settle_search();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    // Cleared before the quiet period of the first edit ran out
    page.set_search("");
    assert_eq!(next_list_update(&mut page).await, Update::SearchSettled);
    assert_eq!(page.search_input(), "");
    assert_eq!(page.query().search(), None);
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    let last = source.requests().pop().unwrap();
    assert_eq!(last.search, None);
    assert_eq!(history.current().as_deref(), Some("/list/students?page=1&sort=name%3Aasc"));
}

#[tokio::test(start_paused = true)]
async fn test_prev_next_stay_in_range() {
    let source = FixtureSource::new();
    source
        .respond(vec![student("s1", "Ann")], 25)
        .respond(vec![student("s2", "Bo")], 25)
        .respond(vec![student("s3", "Cy")], 25);
    let history = Arc::new(MemoryHistory::new());
    let mut page: ListPage<Student> = open(Role::Admin, &source, FixtureClasses::ok(Vec::new()), &history, "");

    page.mount();
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert!(!page.prev_page());

    assert!(page.next_page());
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);
    assert!(page.next_page());
    assert_eq!(next_list_update(&mut page).await, Update::Loaded);

    assert_eq!(page.query().page(), 3);
    assert!(!page.next_page());
    assert!(page.prev_page());
    assert_eq!(page.query().page(), 2);
}
