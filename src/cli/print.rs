use anyhow::{Result, bail};
use care_console::api::{ResourceEndpoint, RestClient};
use care_console::list::{ListController, ListEntity, TableState, TableView};
use care_console::notify::{ToastLevel, ToastQueue};
use std::sync::Arc;

/// One-shot list request options.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub search: Option<String>,
    pub page: u32,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub descending: bool,
}

/// Fetch one page of `T` and render it as plain text.
pub async fn fetch_page<T: ListEntity>(client: RestClient, request: &PageRequest) -> Result<String> {
    let toasts = ToastQueue::new();
    let config = client.config().clone();
    let mut controller = ListController::<T, _>::new(
        ResourceEndpoint::new(client),
        &config,
        Arc::new(toasts.clone()),
    );

    for (name, value) in &request.filters {
        controller.set_filter(name, value)?;
    }
    if let Some(search) = &request.search {
        controller.commit_search(search);
    }
    if let Some(key) = &request.sort {
        if controller.query().sort().key != *key {
            controller.toggle_sort(key);
        }
    }
    if request.descending {
        let key = controller.query().sort().key.clone();
        controller.toggle_sort(&key);
    }
    controller.set_page(request.page);

    if !controller.refresh().await {
        if let Some(toast) = toasts.latest().filter(|t| t.level == ToastLevel::Error) {
            bail!("{}", toast.message);
        }
    }
    Ok(render_table(&controller.view()))
}

pub fn render_table(view: &TableView) -> String {
    let rows: Vec<&[String]> = match &view.state {
        TableState::Loading => return "Loading...\n".to_string(),
        TableState::Empty { message } | TableState::Failed { message } => {
            return format!("{message}\n");
        }
        TableState::Rows(rows) => rows.iter().map(|row| row.cells.as_slice()).collect(),
    };

    let mut widths: Vec<usize> = view.columns.iter().map(|c| c.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, view.columns.iter().copied(), &widths);
    for cells in rows {
        push_line(&mut out, cells.iter().map(String::as_str), &widths);
    }
    if view.show_pagination() {
        if let Some(page) = view.pagination {
            out.push_str(&format!("\n{page}\n"));
        }
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_console::list::{PageSummary, RowView};

    fn view(total_pages: u32) -> TableView {
        TableView {
            title: "FAQs",
            columns: vec!["Question", "Answer"],
            state: TableState::Rows(vec![RowView {
                id: "fq-1".to_string(),
                cells: vec!["Can I cancel?".to_string(), "Yes".to_string()],
                deleting: false,
            }]),
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
    fn renders_aligned_columns() {
        let text = render_table(&view(1));
        assert_eq!(text, "Question       Answer\nCan I cancel?  Yes\n");
    }

    #[test]
    fn shows_page_summary_only_when_paginated() {
        assert!(render_table(&view(3)).ends_with("\nPage 1 of 3\n"));
    }
}
