use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::Config;
use crate::domain::AdminProfile;
use crate::session::SessionStore;
use crate::ui::app::{App, AppContext, Tab};
use crate::ui::events::EventHandler;
use crate::ui::notifications::NoticeLevel;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::{Worker, WorkerCommand, WorkerSender};

/// Everything the console needs at startup.
pub struct Console {
    pub config: Config,
    pub client: ApiClient,
    pub session: SessionStore,
    pub profile: Option<AdminProfile>,
}

/// Runs the terminal UI until the user quits.
///
/// The worker lives on the caller's tokio runtime; the draw loop blocks, so
/// it runs on a blocking thread.
pub async fn run(console: Console) -> io::Result<()> {
    let Console {
        config,
        client,
        session,
        profile,
    } = console;

    let tick_rate = Duration::from_millis(config.ui.tick_ms.max(16));
    let events = EventHandler::new(tick_rate);
    let page_size = config.defaults.page_size;
    let signed_in = client.has_token();
    let context = AppContext {
        base_url: client.base_url().to_string(),
        profile,
        page_size,
        toast_ticks: config.ui.toast_ticks,
    };

    let commands = Worker::new(client, page_size, session, events.sender()).spawn();
    initial_commands(&commands, signed_in);

    let mut app = App::new(context);
    app.attach_worker(commands);
    if !signed_in {
        app.notify(NoticeLevel::Info, "Not logged in. Run `fleetdesk login` first.");
    }

    tokio::task::spawn_blocking(move || event_loop(app, events, tick_rate))
        .await
        .map_err(io::Error::other)?
}

fn initial_commands(commands: &WorkerSender, signed_in: bool) {
    for tab in Tab::ALL {
        let _ = commands.send(WorkerCommand::Refresh(tab));
    }
    if signed_in {
        let _ = commands.send(WorkerCommand::LoadProfile);
    }
}

fn event_loop(mut app: App, events: EventHandler, tick_rate: Duration) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(event) => app.on_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    tracing::info!("console closed");
    Ok(())
}
