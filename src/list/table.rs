use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<String>,
    /// A delete for exactly this row is in flight.
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    /// First fetch of the screen, nothing to show yet.
    Loading,
    Empty { message: String },
    /// The first fetch failed and nothing is pending.
    Failed { message: String },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Everything a renderer needs to draw one list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub state: TableState,
    /// A newer fetch is in flight while older data stays visible.
    pub refreshing: bool,
    pub pagination: Option<PageSummary>,
}

impl TableView {
    pub fn show_pagination(&self) -> bool {
        self.pagination.is_some_and(|page| page.total_pages > 1)
    }

    pub fn rows(&self) -> &[RowView] {
        match &self.state {
            TableState::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TableState::Loading)
    }
}

pub fn empty_message(title: &str) -> String {
    format!("No {} found", title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(total_pages: u32) -> TableView {
        TableView {
            title: "Caregivers",
            columns: vec!["Name"],
            state: TableState::Empty {
                message: empty_message("Caregivers"),
            },
            refreshing: false,
            pagination: Some(PageSummary {
                current_page: 1,
                total_pages,
                has_next_page: total_pages > 1,
                has_prev_page: false,
            }),
        }
    }

    #[test]
    fn pagination_only_for_multiple_pages() {
        assert!(!view(0).show_pagination());
        assert!(!view(1).show_pagination());
        assert!(view(2).show_pagination());
    }

    #[test]
    fn summary_and_empty_text() {
        let v = view(3);
        assert_eq!(v.pagination.unwrap().to_string(), "Page 1 of 3");
        assert_eq!(
            v.state,
            TableState::Empty {
                message: "No caregivers found".to_string()
            }
        );
        assert!(v.rows().is_empty());
    }
}
