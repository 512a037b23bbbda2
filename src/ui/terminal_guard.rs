use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

pub type ConsoleTerminal = Terminal<CrosstermBackend<Stdout>>;

type Cleanup = Box<dyn FnOnce() + Send + 'static>;

/// Restores the terminal on drop or panic, whichever happens first.
pub struct TerminalGuard {
    cleanup: Arc<Mutex<Option<Cleanup>>>,
}

impl TerminalGuard {
    fn new(cleanup: Cleanup) -> Self {
        let guard = Self {
            cleanup: Arc::new(Mutex::new(Some(cleanup))),
        };
        guard.install_panic_hook();
        guard
    }

    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Some(restore) = cleanup.lock().take() {
                restore();
            }
            default_hook(info);
        }));
    }

    fn restore(&self) {
        if let Some(restore) = self.cleanup.lock().take() {
            restore();
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

pub fn setup_terminal() -> io::Result<(ConsoleTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let guard = TerminalGuard::new(Box::new(|| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }));

    Ok((terminal, guard))
}
