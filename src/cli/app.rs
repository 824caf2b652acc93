use super::ui;
use care_console::actions::{DeleteOutcome, DeleteTicket};
use care_console::api::{ListSource, RemoteListResult, ResourceEndpoint, RestClient};
use care_console::core::Result as ConsoleResult;
use care_console::list::{FetchTicket, ListController, ListEntity, NAME_SORT_KEY};
use care_console::notify::{Toast, ToastQueue};
use care_console::session::PageTitle;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tui_textarea::TextArea;

const TICK: Duration = Duration::from_millis(50);

/// Wait up to `timeout` for terminal input. The wait runs on the blocking
/// pool so spawned fetches and the debounce timer keep running meanwhile.
async fn next_input(timeout: Duration) -> io::Result<Option<Event>> {
    off_runtime(move || {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    })
    .await
}

async fn off_runtime<R, F>(work: F) -> io::Result<R>
where
    F: FnOnce() -> io::Result<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(io::Error::other)?
}

enum AppEvent<T> {
    Fetched(FetchTicket, ConsoleResult<RemoteListResult<T>>),
    Deleted(DeleteTicket, ConsoleResult<()>),
}

/// Terminal list screen for one resource.
pub struct App<'a, T: ListEntity> {
    pub textarea: TextArea<'a>,
    pub controller: ListController<T, ResourceEndpoint<T>>,
    pub table_state: TableState,
    pub active_filter: usize,
    pub toast: Option<Toast>,
    pub title: PageTitle,
    pub exit: bool,
    toasts: ToastQueue,
    events_tx: mpsc::UnboundedSender<AppEvent<T>>,
    events_rx: mpsc::UnboundedReceiver<AppEvent<T>>,
}

impl<'a, T: ListEntity> App<'a, T> {
    pub fn new(client: RestClient, title: PageTitle) -> Self {
        let toasts = ToastQueue::new();
        let config = client.config().clone();
        let controller =
            ListController::new(ResourceEndpoint::new(client), &config, Arc::new(toasts.clone()));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        title.set(T::RESOURCE.title());

        Self {
            textarea: Self::new_textarea(),
            controller,
            table_state: TableState::default().with_selected(Some(0)),
            active_filter: 0,
            toast: None,
            title,
            exit: false,
            toasts,
            events_tx,
            events_rx,
        }
    }

    fn new_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text("Search by name or email");
        textarea.set_block(
            ratatui::widgets::Block::default()
                .borders(ratatui::widgets::Borders::ALL)
                .title(" Search "),
        );
        textarea
    }

    pub fn active_filter_name(&self) -> Option<&'static str> {
        T::FILTERS.get(self.active_filter).map(|def| def.name)
    }

    pub async fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        res
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.spawn_fetch();

        loop {
            if self.controller.poll_search() {
                self.spawn_fetch();
            }
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_event(event);
            }
            if let Some(toast) = self.toasts.drain().pop() {
                self.toast = Some(toast);
            }

            terminal.draw(|f| ui::draw(f, self))?;

            if let Some(Event::Key(key)) = next_input(TICK).await? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
            if self.exit {
                return Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: AppEvent<T>) {
        match event {
            AppEvent::Fetched(ticket, result) => {
                if self.controller.apply(ticket, result) {
                    self.clamp_selection();
                }
            }
            AppEvent::Deleted(ticket, result) => {
                if let DeleteOutcome::Deleted(_) = self.controller.finish_delete(ticket, result) {
                    self.spawn_fetch();
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.controller.delete_dialog().is_open() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.spawn_delete(),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.controller.cancel_delete();
                }
                _ => {}
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.exit = true,
            KeyCode::Tab => {
                if let Some(name) = self.active_filter_name() {
                    let changed = self.controller.cycle_filter(name);
                    self.refetch_if(changed);
                }
            }
            KeyCode::BackTab => {
                if !T::FILTERS.is_empty() {
                    self.active_filter = (self.active_filter + 1) % T::FILTERS.len();
                }
            }
            KeyCode::Char('s') if ctrl => {
                self.controller.toggle_sort(NAME_SORT_KEY);
                self.spawn_fetch();
            }
            KeyCode::Char('d') if ctrl => self.open_delete(),
            KeyCode::PageDown => {
                if self.controller.next_page() {
                    self.spawn_fetch();
                }
            }
            KeyCode::PageUp => {
                if self.controller.prev_page() {
                    self.spawn_fetch();
                }
            }
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Enter => {}
            _ => {
                self.textarea.input(key);
                let raw = self.textarea.lines().join(" ");
                self.controller.type_search(&raw);
            }
        }
    }

    fn refetch_if(&mut self, changed: ConsoleResult<bool>) {
        match changed {
            Ok(true) => self.spawn_fetch(),
            Ok(false) => {}
            Err(err) => self.toast = Some(Toast::error(err.toast_message())),
        }
    }

    fn spawn_fetch(&mut self) {
        let ticket = self.controller.begin_fetch();
        let source = self.controller.source();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(&ticket.key).await;
            // The screen may already be gone.
            let _ = tx.send(AppEvent::Fetched(ticket, result));
        });
    }

    fn open_delete(&mut self) {
        let rows = self.controller.rows();
        let Some(row) = self.table_state.selected().and_then(|index| rows.get(index)) else {
            return;
        };
        let id = row.id().to_string();
        if let Err(err) = self.controller.open_delete(&id) {
            self.toast = Some(Toast::error(err.toast_message()));
        }
    }

    fn spawn_delete(&mut self) {
        let Some(ticket) = self.controller.confirm_delete() else {
            return;
        };
        let source = self.controller.source();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.delete(ticket.id()).await;
            let _ = tx.send(AppEvent::Deleted(ticket, result));
        });
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.controller.rows().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.rows().len();
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn input_wait_leaves_the_runtime_free() {
        let ticked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ticked);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            flag.store(true, Ordering::SeqCst);
        });

        let ready = off_runtime(|| {
            std::thread::sleep(Duration::from_millis(200));
            Ok(false)
        })
        .await
        .unwrap();

        assert!(!ready);
        assert!(ticked.load(Ordering::SeqCst));
    }
}
