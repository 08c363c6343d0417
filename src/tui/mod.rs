pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result, SiteSession};
use crate::config::Config;
use crate::domain::{ContentKind, Route, Screen};

use self::app::{ActivePane, Mode, TuiApp};
use self::event::{Action, AppEvent, EventHandler, Message, Payload, Request};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, start: Option<String>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, start).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, start: Option<String>) -> Result<()> {
    let config: &Config = &ctx.config;
    let mut tui_app = TuiApp::new(ctx.policy());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut window_title = String::new();

    if let Some(start) = start {
        open_route(&mut tui_app, &ctx, &start, &tx);
    }

    loop {
        while let Ok(message) = rx.try_recv() {
            let requests = tui_app.apply(message);
            dispatch(&tui_app, requests, &tx);
        }

        let title = tui_app.window_title();
        if title != window_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            window_title = title;
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                tui_app.clear_status();
                if tui_app.mode == Mode::Picker {
                    handle_picker_key(&mut tui_app, &ctx, key, &tx);
                } else {
                    let action = config.keybindings.get_action(&key);
                    let requests = handle_action(&mut tui_app, action);
                    dispatch(&tui_app, requests, &tx);
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_picker_key(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    key: KeyEvent,
    tx: &UnboundedSender<Message>,
) {
    match key.code {
        KeyCode::Enter => {
            let input = tui_app.input.trim().to_string();
            if input.is_empty() {
                tui_app.set_status("Enter a hostname first".to_string());
            } else {
                open_route(tui_app, ctx, &input, tx);
            }
        }
        KeyCode::Esc => {
            if tui_app.session.is_some() {
                tui_app.mode = Mode::Site;
            } else {
                tui_app.should_quit = true;
            }
        }
        KeyCode::Backspace => {
            tui_app.input.pop();
        }
        KeyCode::Char(c) => {
            tui_app.input.push(c);
        }
        _ => {}
    }
}

/// Open a hostname or a full route such as `example.com/posts/tag/3`.
fn open_route(tui_app: &mut TuiApp, ctx: &AppContext, raw: &str, tx: &UnboundedSender<Message>) {
    let route = match Route::parse(raw) {
        Ok(route) => route,
        Err(e) => {
            tui_app.set_status(e.to_string());
            return;
        }
    };

    match ctx.session(&route.hostname) {
        Ok(session) => {
            tracing::info!("Opening {}", route);
            let requests = tui_app.enter_site(session, route.screen);
            dispatch(tui_app, requests, tx);
        }
        Err(e) => {
            tui_app.set_status(format!("Cannot open {}: {}", route.hostname, e));
        }
    }
}

fn handle_action(tui_app: &mut TuiApp, action: Action) -> Vec<Request> {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
            Vec::new()
        }
        Action::MoveUp => {
            tui_app.move_up();
            Vec::new()
        }
        Action::MoveDown => {
            tui_app.move_down();
            Vec::new()
        }
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::NextPane => {
            tui_app.active_pane = tui_app.active_pane.next();
            Vec::new()
        }
        Action::PrevPane => {
            tui_app.active_pane = tui_app.active_pane.prev();
            Vec::new()
        }
        Action::GoHome => tui_app.navigate(Screen::Home),
        Action::GoPosts => tui_app.go_listing(ContentKind::Posts),
        Action::GoPages => tui_app.go_listing(ContentKind::Pages),
        Action::ChangeSite => {
            tui_app.show_picker();
            Vec::new()
        }
        Action::Select => match tui_app.active_pane {
            ActivePane::Nav => {
                tui_app.active_pane = ActivePane::Items;
                tui_app.select_nav()
            }
            ActivePane::Items => {
                tui_app.active_pane = ActivePane::Preview;
                Vec::new()
            }
            ActivePane::Preview => Vec::new(),
        },
        Action::OpenInBrowser => {
            let link = tui_app.selected_link().map(str::to_string);
            if let Some(link) = link {
                if let Err(e) = open::that(&link) {
                    tui_app.set_status(format!("Failed to open browser: {}", e));
                }
            }
            Vec::new()
        }
        Action::Reload => tui_app.reload(),
        Action::FilterCategory => tui_app.filter_by_selected(true),
        Action::FilterTag => tui_app.filter_by_selected(false),
        Action::ClearFilter => tui_app.clear_filter(),
        Action::None => Vec::new(),
    }
}

/// Start each request as its own task. Results come back over `tx`.
fn dispatch(tui_app: &TuiApp, requests: Vec<Request>, tx: &UnboundedSender<Message>) {
    let Some(session) = tui_app.session.as_ref() else {
        return;
    };
    for request in requests {
        spawn_request(session.clone(), tui_app.visit, request, tx.clone());
    }
}

fn spawn_request(session: SiteSession, visit: u64, request: Request, tx: UnboundedSender<Message>) {
    tokio::spawn(async move {
        let payload = perform(&session, request).await;
        // The receiver is gone once the TUI has exited.
        let _ = tx.send(Message { visit, payload });
    });
}

/// Run one request against the site's services.
pub async fn perform(session: &SiteSession, request: Request) -> Payload {
    match request {
        Request::Resolve(ticket) => Payload::Site(ticket, session.resolver.resolve().await),
        Request::Home(ticket) => Payload::Home(ticket, session.content.home().await),
        Request::Listing {
            ticket,
            kind,
            filter,
            page,
        } => Payload::Listing(ticket, session.content.fetch(kind, filter, page).await),
        Request::Label { kind, id } => Payload::Label(kind, id, session.labels.label(kind, id).await),
    }
}
