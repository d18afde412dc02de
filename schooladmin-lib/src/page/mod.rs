//! List page controller.
//!
//! A [`ListPage`] owns the query state of one list view and everything
//! derived from it: the fetched rows, the page count, the inline error, and
//! the class filter options. It is driven by discrete events: user actions
//! are plain method calls, while fetch results and settled search input
//! arrive through [`ListPage::next_update`].
//!
//! # Example
//!
//! ```ignore
//! let history = Arc::new(MemoryHistory::new());
//! let mut page: ListPage<Student> =
//!     ListPage::with_client(PageConfig::new(session), client, history, "page=2");
//! page.mount();
//!
//! loop {
//!     tokio::select! {
//!         update = page.next_update() => draw(&page, update),
//!         input = read_input() => match input {
//!             Input::Search(text) => page.set_search(text),
//!             Input::Next => { page.next_page(); }
//!             // ...
//!         },
//!     }
//! }
//! ```

mod debounce;
mod navigator;
mod record;
mod source;

pub use debounce::*;
pub use navigator::*;
pub use record::*;
pub use source::*;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::SchoolClient;
use crate::api::ListRequest;
use crate::api::ListResult;
use crate::api::query::QueryState;
use crate::api::query::url;
use crate::error::Error;
use crate::model::ClassRef;
use crate::session::Session;
use crate::view::ClassOption;
use crate::view::PageAction;
use crate::view::PaginationView;
use crate::view::TableView;
use crate::view::class_options;
use crate::view::page_actions;

/// Per-page settings.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Decides which actions are offered.
    pub session: Session,
    /// Quiet period before search edits trigger a fetch.
    pub search_debounce: Duration,
}

impl PageConfig {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }

    pub fn with_search_debounce(mut self, quiet: Duration) -> Self {
        self.search_debounce = quiet;
        self
    }
}

/// What [`ListPage::next_update`] applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// New rows are displayed.
    Loaded,
    /// The latest fetch failed; the error is set and the previous rows kept.
    Failed,
    /// The class list arrived (or failed and was left empty).
    ClassesLoaded,
    /// The search input settled and a fetch was started.
    SearchSettled,
    /// Nothing can produce further updates.
    Closed,
}

enum PageEvent<R> {
    Loaded {
        generation: u64,
        result: Result<ListResult<R>, Error>,
    },
    Classes(Result<Vec<ClassRef>, Error>),
}

enum Wake<R> {
    Event(PageEvent<R>),
    Search(String),
    Closed,
}

/// State and behavior of one list page (students or teachers).
pub struct ListPage<R: ListRecord> {
    config: PageConfig,
    query: QueryState,
    search: Debounced<String>,
    records: Vec<R>,
    total_pages: u32,
    error: Option<String>,
    loading: bool,
    classes: Vec<ClassRef>,
    classes_loading: bool,
    source: Arc<dyn RecordSource<R>>,
    class_source: Arc<dyn ClassSource>,
    navigator: Arc<dyn Navigator>,
    /// Incremented by every fetch; only the latest may update the page.
    generation: u64,
    in_flight: Option<CancellationToken>,
    events_tx: mpsc::UnboundedSender<PageEvent<R>>,
    events_rx: mpsc::UnboundedReceiver<PageEvent<R>>,
}

impl<R: ListRecord> ListPage<R> {
    /// Creates a page seeded from a URL query string, e.g. `page=2&sort=phone:desc`.
    ///
    /// Nothing is fetched until [`mount`](Self::mount). Must be called inside
    /// a tokio runtime.
    pub fn new(
        config: PageConfig,
        source: Arc<dyn RecordSource<R>>,
        class_source: Arc<dyn ClassSource>,
        navigator: Arc<dyn Navigator>,
        query: &str,
    ) -> Self {
        let query = url::parse_query(query);
        let search = Debounced::new(query.search().unwrap_or_default().to_string(), config.search_debounce);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            config,
            query,
            search,
            records: Vec::new(),
            total_pages: 1,
            error: None,
            loading: false,
            classes: Vec::new(),
            classes_loading: false,
            source,
            class_source,
            navigator,
            generation: 0,
            in_flight: None,
            events_tx,
            events_rx,
        }
    }

    /// Creates a page backed by a [`SchoolClient`] for both records and classes.
    pub fn with_client(config: PageConfig, client: SchoolClient, navigator: Arc<dyn Navigator>, query: &str) -> Self {
        let client = Arc::new(client);
        Self::new(config, client.clone(), client, navigator, query)
    }

    /// Starts the class fetch and the first page fetch.
    pub fn mount(&mut self) {
        self.load_classes();
        self.reload();
    }

    /// Fetches the current page again.
    pub fn refresh(&mut self) {
        self.reload();
    }

    /// Records a search edit. The fetch waits for the input to settle.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search.set(text.into());
    }

    /// Applies the search input now instead of waiting for the quiet period.
    pub fn settle_search(&mut self) {
        let text = self.search.value().clone();
        self.search.settle_now(text.clone());
        if self.query.set_search(&text) {
            self.reload();
        }
    }

    /// Selects a class, or clears the filter with an empty id.
    pub fn select_class(&mut self, class: &str) {
        if self.query.set_class(class) {
            self.reload();
        }
    }

    /// Sorts on `field`, flipping the direction if it is already active.
    pub fn sort_by(&mut self, field: &str) {
        self.query.sort_by(field);
        self.reload();
    }

    /// Clicks the table header at `index`. Returns `true` if the column was
    /// sortable.
    pub fn click_header(&mut self, index: usize) -> bool {
        let mut key = None;
        self.table().click_header(index, |k| key = Some(k.to_string()));
        match key {
            Some(key) => {
                self.sort_by(&key);
                true
            }
            None => false,
        }
    }

    /// Moves to `page` without clamping it to the page count.
    pub fn go_to_page(&mut self, page: u32) {
        if self.query.set_page(page) {
            self.reload();
        }
    }

    /// Clicks the Next control. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let mut target = None;
        self.pagination().next.click(|page| target = Some(page));
        match target {
            Some(page) => {
                self.go_to_page(page);
                true
            }
            None => false,
        }
    }

    /// Clicks the Prev control. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        let mut target = None;
        self.pagination().prev.click(|page| target = Some(page));
        match target {
            Some(page) => {
                self.go_to_page(page);
                true
            }
            None => false,
        }
    }

    /// Waits for and applies the next fetch result or settled search.
    ///
    /// Results of superseded fetches are discarded without returning.
    pub async fn next_update(&mut self) -> Update {
        loop {
            let wake = tokio::select! {
                Some(event) = self.events_rx.recv() => Wake::Event(event),
                Some(text) = self.search.changed() => Wake::Search(text),
                else => Wake::Closed,
            };

            match wake {
                Wake::Event(event) => {
                    if let Some(update) = self.apply(event) {
                        return update;
                    }
                }
                Wake::Search(text) => {
                    if self.query.set_search(&text) {
                        self.reload();
                        return Update::SearchSettled;
                    }
                }
                Wake::Closed => return Update::Closed,
            }
        }
    }

    fn apply(&mut self, event: PageEvent<R>) -> Option<Update> {
        match event {
            PageEvent::Loaded { generation, result } => {
                if generation != self.generation {
                    log::debug!(
                        "discarding stale {} response (generation {}, current {})",
                        R::RESOURCE,
                        generation,
                        self.generation
                    );
                    return None;
                }
                self.in_flight = None;
                self.loading = false;
                match result {
                    Ok(result) => {
                        self.total_pages = result.total_pages();
                        self.records = result.into_records();
                        Some(Update::Loaded)
                    }
                    Err(e) => {
                        log::error!("Error fetching {}: {}", R::RESOURCE, e);
                        self.error = Some(e.user_message(R::RESOURCE.path()));
                        Some(Update::Failed)
                    }
                }
            }
            PageEvent::Classes(result) => {
                self.classes_loading = false;
                match result {
                    Ok(classes) => self.classes = classes,
                    Err(e) => {
                        log::warn!("Error fetching classes: {}", e);
                        self.classes = Vec::new();
                    }
                }
                Some(Update::ClassesLoaded)
            }
        }
    }

    /// Starts a fetch for the current state, superseding any in flight.
    fn reload(&mut self) {
        self.generation += 1;
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.error = None;
        self.loading = true;
        self.navigator.push(&self.url(), false);

        let request = ListRequest::from_state(R::RESOURCE, &self.query);
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("cancelled {} fetch (generation {})", request.resource, generation);
                }
                result = source.fetch_page(&request) => {
                    let _ = tx.send(PageEvent::Loaded { generation, result });
                }
            }
        });
    }

    fn load_classes(&mut self) {
        self.classes_loading = true;
        let source = Arc::clone(&self.class_source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_classes().await;
            let _ = tx.send(PageEvent::Classes(result));
        });
    }

    // -------------------------------------------------------------------------
    // View accessors
    // -------------------------------------------------------------------------

    /// Page heading.
    pub fn title(&self) -> &'static str {
        R::RESOURCE.title()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The search box contents, including edits not yet settled.
    pub fn search_input(&self) -> &str {
        self.search.value()
    }

    /// Current page URL: the list path plus the serialized query state.
    pub fn url(&self) -> String {
        url::to_url(R::RESOURCE.list_path(), &self.query)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Inline error of the latest fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn classes_loading(&self) -> bool {
        self.classes_loading
    }

    pub fn classes(&self) -> &[ClassRef] {
        &self.classes
    }

    pub fn session(&self) -> &Session {
        &self.config.session
    }

    /// Renders the table for the current rows.
    pub fn table(&self) -> TableView {
        let session = &self.config.session;
        TableView::render(
            &R::columns(),
            &self.records,
            |record| record.render_row(session),
            Some(self.query.sort()),
        )
    }

    pub fn pagination(&self) -> PaginationView {
        PaginationView::new(self.query.page(), self.total_pages)
    }

    pub fn class_options(&self) -> Vec<ClassOption> {
        class_options(&self.classes, self.query.class())
    }

    pub fn page_actions(&self) -> Vec<PageAction> {
        page_actions(R::RESOURCE, &self.config.session)
    }
}

impl<R: ListRecord> Drop for ListPage<R> {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}
