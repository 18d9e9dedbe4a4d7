//! Display surface: terminal setup/teardown and the three-pane grid.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ headline (1/20)                              │
//! ├───────────────┬──────────────────────────────┤
//! │ weather       │ forecast                     │
//! │ (4/11)        │ (7/11)                       │
//! └───────────────┴──────────────────────────────┘
//! ```

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use weather_dash_core::{Dashboard, render::clock};

const WAITING: &str = "\n waiting for data...";

/// Owns the terminal for the lifetime of the dashboard.
///
/// Raw mode and the alternate screen are released on drop, so every exit
/// path out of the refresh loop restores the terminal.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err);
            }
        };

        let mut tui = Self { terminal };
        tui.terminal.clear()?;
        Ok(tui)
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Every step runs even when an earlier one fails.
    fn restore(&mut self) -> io::Result<()> {
        let raw_mode = disable_raw_mode();
        let screen = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = self.terminal.show_cursor();

        first_error([raw_mode, screen, cursor])
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().collect()
}

pub fn draw<B: Backend>(terminal: &mut Terminal<B>, dashboard: &Dashboard) -> io::Result<()> {
    terminal.draw(|frame| render(frame, dashboard))?;
    Ok(())
}

/// Match the grid to new terminal dimensions; the next draw repaints it.
pub fn reflow<B: Backend>(terminal: &mut Terminal<B>, width: u16, height: u16) -> io::Result<()> {
    terminal.resize(Rect::new(0, 0, width, height))?;
    terminal.clear()
}

fn title_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::Black).add_modifier(Modifier::BOLD)
}

fn pane_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::Black)
}

fn headline(dashboard: &Dashboard) -> Paragraph<'_> {
    let title = match dashboard.panes() {
        Some(panes) => panes.headline.clone(),
        None => dashboard.location().zip_query(),
    };

    let mut spans = vec![Span::styled(format!(" {title} "), title_style())];

    if let Some(error) = dashboard.last_error() {
        if let Some(at) = dashboard.last_refresh() {
            spans.push(Span::styled(format!(" last update {} ", clock(&at)), pane_style()));
        }
        spans.push(Span::styled(
            format!(" refresh failed: {error} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    Paragraph::new(Line::from(spans))
}

fn pane<'a>(title: &'a str, text: &'a str) -> Paragraph<'a> {
    let block = Block::default()
        .title(title)
        .title_style(title_style())
        .borders(Borders::ALL)
        .border_style(pane_style());

    Paragraph::new(text).style(pane_style()).block(block)
}

/// Paint the headline and both panes from the dashboard's cached state.
fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let [head_area, body_area] =
        Layout::vertical([Constraint::Ratio(1, 20), Constraint::Ratio(19, 20)])
            .areas(frame.area());
    let [current_area, forecast_area] =
        Layout::horizontal([Constraint::Ratio(4, 11), Constraint::Ratio(7, 11)]).areas(body_area);

    let (current, forecast) = match dashboard.panes() {
        Some(panes) => (panes.current.as_str(), panes.forecast.as_str()),
        None => (WAITING, WAITING),
    };

    frame.render_widget(headline(dashboard), head_area);
    frame.render_widget(pane(" weather ", current), current_area);
    frame.render_widget(pane(" forecast ", forecast), forecast_area);
}
