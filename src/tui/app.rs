use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::api::{HttpTaskApi, TaskApi};
use crate::model::{Config, Task};
use crate::store::{self, Outcome, Request, TaskStore};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode, derived from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Editor modal is open
    Edit,
    /// Delete confirmation popup is open
    Confirm,
}

/// Which editor field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Title,
    Description,
}

impl EditField {
    pub fn toggle(self) -> Self {
        match self {
            EditField::Title => EditField::Description,
            EditField::Description => EditField::Title,
        }
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    /// Base URL shown in the header
    pub api_url: String,
    /// Selected row in the task list
    pub cursor: usize,
    pub list_state: ListState,
    pub field: EditField,
    pub show_help: bool,
    /// Last sync error, cleared on the next key press
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Requests produced by input handling, waiting to be spawned
    outbox: Vec<Request>,
    /// Requests spawned but not yet answered
    pub in_flight: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            store: TaskStore::new(),
            theme: Theme::from_config(&config.ui),
            api_url: config.api_url.clone(),
            cursor: 0,
            list_state: ListState::default(),
            field: EditField::Title,
            show_help: false,
            status_message: None,
            should_quit: false,
            outbox: Vec::new(),
            in_flight: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.store.pending_delete().is_some() {
            Mode::Confirm
        } else if self.store.show_modal() {
            Mode::Edit
        } else {
            Mode::Navigate
        }
    }

    /// The task under the cursor
    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.cursor)
    }

    /// Queue a request for the event loop to send
    pub fn queue(&mut self, request: Request) {
        self.outbox.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Requests queued since the last [`take_requests`](App::take_requests)
    pub fn queued(&self) -> &[Request] {
        &self.outbox
    }

    /// Apply an API answer and keep the cursor on a real row
    pub fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Err(e) = self.store.apply(outcome) {
            self.status_message = Some(e.to_string());
        }
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.store.tasks().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn TaskApi> = Arc::new(HttpTaskApi::from_config(config)?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let (tx, rx) = mpsc::unbounded_channel();

    let mut app = App::new(config);
    let initial = app.store.begin_load();
    app.queue(initial);
    info!(api_url = %config.api_url, "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &runtime, &api, tx, rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Outstanding requests are abandoned, not awaited
    runtime.shutdown_background();
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
    api: &Arc<dyn TaskApi>,
    tx: UnboundedSender<Outcome>,
    mut rx: UnboundedReceiver<Outcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for request in app.take_requests() {
            spawn_request(runtime, api, &tx, request);
            app.in_flight += 1;
        }
        while let Ok(outcome) = rx.try_recv() {
            app.apply(outcome);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Send a request on the runtime; the outcome comes back through `tx`
fn spawn_request(
    runtime: &Runtime,
    api: &Arc<dyn TaskApi>,
    tx: &UnboundedSender<Outcome>,
    request: Request,
) {
    let api = Arc::clone(api);
    let tx = tx.clone();
    runtime.spawn(async move {
        let outcome = store::execute(api.as_ref(), request).await;
        if tx.send(outcome).is_err() {
            debug!("ui gone, dropping outcome");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::TaskId;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn mode_follows_store() {
        let mut app = app_with_tasks(sample_tasks());
        assert_eq!(app.mode(), Mode::Navigate);
        app.store.open_editor(None);
        assert_eq!(app.mode(), Mode::Edit);
        app.store.close_editor();
        app.store.request_remove(TaskId::Number(1));
        assert_eq!(app.mode(), Mode::Confirm);
    }

    #[test]
    fn apply_clamps_cursor_after_delete() {
        let mut app = app_with_tasks(sample_tasks());
        app.cursor = 2;
        app.in_flight = 1;
        app.apply(Outcome::Deleted {
            id: TaskId::Number(3),
            result: Ok(()),
        });
        assert_eq!(app.cursor, 1);
        assert_eq!(app.in_flight, 0);
    }

    #[test]
    fn apply_failure_sets_status_message() {
        let mut app = app_with_tasks(sample_tasks());
        app.apply(Outcome::Loaded(Err(ApiError::Rejected {
            message: "boom".into(),
        })));
        assert_eq!(
            app.status_message.as_deref(),
            Some("api rejected request: boom")
        );
        assert_eq!(app.store.tasks().len(), 3);
    }

    #[test]
    fn take_requests_drains_queue() {
        let mut app = app_with_tasks(vec![]);
        app.queue(Request::Load);
        assert_eq!(app.queued(), &[Request::Load]);
        assert_eq!(app.take_requests(), vec![Request::Load]);
        assert!(app.queued().is_empty());
    }
}
