use std::{io, time::Duration};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::{Stream, StreamExt};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{self, Instant};
use weather_dash_core::{Dashboard, Transition};

use crate::{input, tui};

/// Run the dashboard until the user quits or the process is asked to stop.
pub async fn run(mut dashboard: Dashboard, refresh_every: Duration) -> Result<()> {
    let mut guard = tui::Tui::enter().context("Failed to initialize terminal")?;

    event_loop(
        &mut dashboard,
        guard.terminal_mut(),
        EventStream::new(),
        refresh_every,
        shutdown_signal(),
    )
    .await
}

/// One refresh is painted before the first wait so the screen is never empty.
/// After that, a single wait point multiplexes the refresh timer, terminal
/// input and `shutdown`; each refresh is awaited to completion before the
/// next event is taken.
pub async fn event_loop<B, S>(
    dashboard: &mut Dashboard,
    terminal: &mut Terminal<B>,
    mut events: S,
    refresh_every: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    dashboard.refresh().await?;
    tui::draw(terminal, dashboard).context("Failed to draw dashboard")?;

    let mut ticker = time::interval_at(Instant::now() + refresh_every, refresh_every);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dashboard.refresh().await?;
                tui::draw(terminal, dashboard).context("Failed to draw dashboard")?;
            }
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    tracing::info!("terminal event stream closed");
                    break;
                };
                let event = event.context("Failed to read terminal event")?;

                match dashboard.handle_input(input::translate(&event)) {
                    Transition::Quit => break,
                    Transition::Reflow { width, height } => {
                        tui::reflow(terminal, width, height).context("Failed to resize dashboard")?;
                        tui::draw(terminal, dashboard).context("Failed to draw dashboard")?;
                    }
                    Transition::Ignore => {}
                }
            }
            () = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    tracing::info!("quitting");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::terminate()), signal(SignalKind::hangup())) {
        (Ok(mut terminate), Ok(mut hangup)) => {
            tokio::select! {
                _ = terminate.recv() => {}
                _ = hangup.recv() => {}
            }
        }
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(error = %err, "failed to install signal handlers");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
