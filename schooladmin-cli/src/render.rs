//! Plain-text drawing of a list page.

use std::fmt::Write;

use schooladmin_lib::api::query::Direction;
use schooladmin_lib::page::ListPage;
use schooladmin_lib::page::ListRecord;
use schooladmin_lib::view::Breakpoint;
use schooladmin_lib::view::Cell;
use schooladmin_lib::view::ControlKind;
use schooladmin_lib::view::PageAction;
use schooladmin_lib::view::PaginationView;
use schooladmin_lib::view::TableView;

/// Picks the widest breakpoint that fits `columns` terminal columns.
pub fn breakpoint(columns: usize) -> Breakpoint {
    match columns {
        0..80 => Breakpoint::Always,
        80..120 => Breakpoint::Medium,
        _ => Breakpoint::Large,
    }
}

/// Draws the whole page: heading, filters, table, pagination, error.
pub fn page<R: ListRecord>(page: &ListPage<R>, screen: Breakpoint) -> String {
    let mut out = String::new();

    let _ = write!(out, "== {} ==", page.title());
    for action in page.page_actions() {
        match action {
            PageAction::Create { table } => {
                let _ = write!(out, "  [+ new {}]", table);
            }
        }
    }
    out.push('\n');

    let class = page
        .class_options()
        .into_iter()
        .find(|o| o.selected)
        .map(|o| o.label)
        .unwrap_or_default();
    let _ = writeln!(out, "search: {:?}  class: {}", page.search_input(), class);
    if page.classes_loading() {
        out.push_str("(loading classes)\n");
    }

    if let Some(error) = page.error() {
        let _ = writeln!(out, "! {}", error);
    }

    let table = page.table();
    if table.is_empty() {
        out.push_str("No records\n");
    } else {
        out.push_str(&self::table(&table, screen));
    }

    out.push_str(&pagination(&page.pagination()));
    out.push('\n');
    if page.is_loading() {
        out.push_str("(loading)\n");
    }
    out
}

/// Draws the visible columns of a table with aligned cells.
pub fn table(view: &TableView, screen: Breakpoint) -> String {
    let visible: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.visible_from <= screen)
        .map(|(i, _)| i)
        .collect();

    let headers: Vec<String> = visible
        .iter()
        .map(|&i| {
            let header = &view.headers[i];
            let arrow = match header.sorted {
                Some(Direction::Asc) => " ^",
                Some(Direction::Desc) => " v",
                None if header.is_sortable() => " *",
                None => "",
            };
            format!("{}:{}{}", i, header.header, arrow)
        })
        .collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| visible.iter().map(|&i| row.cells.get(i).map(cell).unwrap_or_default()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let mut out = String::new();
    line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, &rule, &widths);
    for row in &rows {
        line(&mut out, row, &widths);
    }
    out
}

fn line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{:<width$}", text, width = *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn cell(cell: &Cell) -> String {
    match cell {
        Cell::Text { text, detail: Some(detail) } => format!("{} ({})", text, detail),
        Cell::Text { text, detail: None } => text.clone(),
        Cell::Actions(actions) => actions
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join("/"),
    }
}

/// Draws Prev, the numbered pages, and Next on one line.
pub fn pagination(view: &PaginationView) -> String {
    std::iter::once(&view.prev)
        .chain(&view.pages)
        .chain(std::iter::once(&view.next))
        .map(|control| match control.kind {
            ControlKind::Page if control.current => format!("[{}]", control.label),
            ControlKind::Page => control.label.clone(),
            _ if control.disabled => format!("({})", control.label),
            _ => control.label.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use schooladmin_lib::api::query::SortSpec;
    use schooladmin_lib::view::Column;
    use schooladmin_lib::view::Row;
    use schooladmin_lib::view::RowAction;

    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(breakpoint(60), Breakpoint::Always);
        assert_eq!(breakpoint(100), Breakpoint::Medium);
        assert_eq!(breakpoint(200), Breakpoint::Large);
    }

    #[test]
    fn test_pagination_line() {
        assert_eq!(pagination(&PaginationView::new(1, 3)), "(Prev) [1] 2 3 Next");
        assert_eq!(pagination(&PaginationView::new(3, 3)), "Prev 1 2 [3] (Next)");
    }

    #[test]
    fn test_table_hides_narrow_columns() {
        let columns = vec![
            Column::new("Info", "info").sortable("name"),
            Column::new("Phone", "phone").visible_from(Breakpoint::Large),
            Column::new("Actions", "action"),
        ];
        let rows = vec![Row::new(vec![
            Cell::with_detail("Ann", "5A"),
            Cell::text("555-0101"),
            Cell::Actions(vec![RowAction::View {
                href: "/list/students/1".to_string(),
            }]),
        ])];
        let view = TableView::render(&columns, &rows, Clone::clone, Some(&SortSpec::desc("name")));

        let narrow = table(&view, Breakpoint::Always);
        assert_eq!(
            narrow,
            "0:Info v | 2:Actions\n\
             -------- | ---------\n\
             Ann (5A) | View\n"
        );

        let wide = table(&view, Breakpoint::Large);
        assert!(wide.contains("1:Phone"));
        assert!(wide.contains("555-0101"));
    }
}
