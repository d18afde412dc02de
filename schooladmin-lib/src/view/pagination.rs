//! Pagination control view model.

/// What a pagination control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Prev,
    Next,
    Page,
}

/// One pagination button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    /// Page requested when clicked.
    pub target: u32,
    pub disabled: bool,
    /// Set on the numbered control of the current page.
    pub current: bool,
}

impl PageControl {
    /// Handles a click: calls `on_change` with the target page unless the
    /// control is disabled. Returns `true` if the callback ran.
    pub fn click(&self, on_change: impl FnOnce(u32)) -> bool {
        if self.disabled {
            return false;
        }
        on_change(self.target);
        true
    }
}

/// Prev, one control per page, and Next.
///
/// Every page from 1 to `total_pages` gets a control; there is no windowing.
/// Targets are not clamped, so callers must treat out-of-range pages safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev: PageControl,
    pub pages: Vec<PageControl>,
    pub next: PageControl,
}

impl PaginationView {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let prev = PageControl {
            kind: ControlKind::Prev,
            label: "Prev".to_string(),
            target: current_page.saturating_sub(1),
            disabled: current_page <= 1,
            current: false,
        };
        let next = PageControl {
            kind: ControlKind::Next,
            label: "Next".to_string(),
            target: current_page.saturating_add(1),
            disabled: current_page >= total_pages,
            current: false,
        };
        let pages = (1..=total_pages)
            .map(|page| PageControl {
                kind: ControlKind::Page,
                label: page.to_string(),
                target: page,
                disabled: false,
                current: page == current_page,
            })
            .collect();

        Self {
            current_page,
            total_pages,
            prev,
            pages,
            next,
        }
    }

    /// Returns the numbered control for `page`, if rendered.
    pub fn page(&self, page: u32) -> Option<&PageControl> {
        self.pages.iter().find(|c| c.target == page)
    }
}
