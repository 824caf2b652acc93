use super::app::App;
use care_console::list::{ListEntity, SortDirection, TableState as ViewState};
use care_console::notify::ToastLevel;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn draw<T: ListEntity>(f: &mut Frame, app: &mut App<T>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Length(1), // filters and sort
            Constraint::Min(3),    // table
            Constraint::Length(1), // pagination
            Constraint::Length(1), // toast
        ])
        .split(f.area());

    f.render_widget(&app.textarea, chunks[0]);
    f.render_widget(Paragraph::new(controls_line(app)), chunks[1]);

    let view = app.controller.view();
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {}{} ",
        app.title.current(),
        if view.refreshing { " (refreshing)" } else { "" }
    ));

    match &view.state {
        ViewState::Loading => {
            f.render_widget(Paragraph::new("Loading...").block(block), chunks[2]);
        }
        ViewState::Empty { message } => {
            f.render_widget(
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                chunks[2],
            );
        }
        ViewState::Failed { message } => {
            f.render_widget(
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                chunks[2],
            );
        }
        ViewState::Rows(rows) => {
            let header = Row::new(view.columns.iter().map(|c| Cell::from(*c)))
                .style(Style::default().add_modifier(Modifier::BOLD));
            let body = rows.iter().map(|row| {
                let style = if row.deleting {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let mut cells: Vec<Cell> = row.cells.iter().map(|c| Cell::from(c.clone())).collect();
                if row.deleting {
                    cells.push(Cell::from("deleting..."));
                }
                Row::new(cells).style(style)
            });
            let widths = vec![Constraint::Fill(1); view.columns.len() + 1];
            let table = Table::new(body, widths)
                .header(header)
                .block(block)
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(table, chunks[2], &mut app.table_state);
        }
    }

    if view.show_pagination() {
        if let Some(page) = view.pagination {
            let hint = format!(
                "{page}  {}{}",
                if page.has_prev_page { "[PgUp] prev  " } else { "" },
                if page.has_next_page { "[PgDn] next" } else { "" }
            );
            f.render_widget(Paragraph::new(hint), chunks[3]);
        }
    }

    if let Some(toast) = &app.toast {
        let color = match toast.level {
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        };
        f.render_widget(
            Paragraph::new(toast.message.as_str()).style(Style::default().fg(color)),
            chunks[4],
        );
    }

    let dialog = app.controller.delete_dialog();
    if let Some(target) = dialog.target() {
        let area = centered(f.area(), 50, 7);
        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(format!("Delete {target}? This cannot be undone.")),
            Line::from(""),
        ];
        if dialog.is_deleting(target) {
            lines.push(Line::from("Deleting..."));
        } else {
            if let Some(error) = dialog.error() {
                lines.push(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::from("[y] confirm   [n] cancel"));
        }
        let popup = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Confirm delete "));
        f.render_widget(popup, area);
    }
}

fn controls_line<T: ListEntity>(app: &App<T>) -> Line<'static> {
    let query = app.controller.query();
    let mut spans = Vec::new();
    for (index, def) in T::FILTERS.iter().enumerate() {
        let value = query.filter(def.name).unwrap_or(def.default_value());
        let style = if index == app.active_filter {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{}: {value}  ", def.name), style));
    }
    let arrow = match query.sort().direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    };
    spans.push(Span::raw(format!("sort: {} {arrow}", query.sort().key)));
    spans.push(Span::styled(
        "   [Tab] filter  [S-Tab] next filter  [^S] sort  [^D] delete  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
