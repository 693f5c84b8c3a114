//! Taking over and handing back the terminal.
//!
//! The board runs on the alternate screen in raw mode with mouse capture on,
//! since cards are picked up and dragged with the mouse. Whatever happens,
//! including a panic mid-drag, the shell must get its terminal back.

use std::io::{self, Stdout, Write};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

/// The terminal the board draws on.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Failure to take over or hand back the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to setup terminal: {0}")]
    Setup(#[source] io::Error),

    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Switches to raw mode and the alternate screen, and starts reporting
/// mouse presses, drags and releases.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if the terminal refuses any step.
///
/// # Examples
///
/// ```no_run
/// use snapboard_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal().expect("terminal");
/// terminal::restore_terminal(&mut terminal).expect("terminal");
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(TerminalError::Setup)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)?;
    debug!("terminal ready");
    Ok(terminal)
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if the terminal refuses any step.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    release(terminal.backend_mut()).map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    debug!("terminal restored");
    Ok(())
}

/// Makes a panic restore the terminal before the previous hook prints it.
///
/// Install once, before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = release(&mut io::stdout());
        previous(info);
    }));
}

fn release<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_stops_mouse_reports_then_leaves_the_alternate_screen() {
        let mut out = Vec::new();
        release(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1000l"), "{written:?}");
        assert!(written.ends_with("\x1b[?1049l"), "{written:?}");
    }
}
