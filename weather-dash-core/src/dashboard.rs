//! Application state shared by the refresh loop, input dispatch and painting.

use anyhow::Context;
use chrono::{DateTime, Local};

use crate::{
    model::Location,
    provider::{FORECAST_ENTRIES, WeatherProvider},
    render::{Panes, RenderOptions},
};

/// Input, already translated from whatever terminal backend produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Resize { width: u16, height: u16 },
    Other,
}

/// What the loop must do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Quit,
    /// Reflow the display to the new size and repaint from cached panes.
    Reflow { width: u16, height: u16 },
    Ignore,
}

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    location: Location,
    options: RenderOptions,
    fail_fast: bool,
    panes: Option<Panes>,
    last_error: Option<String>,
    last_refresh: Option<DateTime<Local>>,
}

impl Dashboard {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        location: Location,
        options: RenderOptions,
        fail_fast: bool,
    ) -> Self {
        Self {
            provider,
            location,
            options,
            fail_fast,
            panes: None,
            last_error: None,
            last_refresh: None,
        }
    }

    /// Fetch both snapshots and re-render all panes.
    ///
    /// Panes are replaced only when both fetches succeed. On failure the
    /// previous panes stay and the error is recorded; it is returned only in
    /// fail-fast mode.
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        match self.fetch_panes().await {
            Ok(panes) => {
                tracing::info!(location = %self.location.zip_query(), "refreshed weather");
                self.panes = Some(panes);
                self.last_error = None;
                self.last_refresh = Some(Local::now());
                Ok(())
            }
            Err(err) if self.fail_fast => Err(err),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "refresh failed, keeping last data");
                self.last_error = Some(format!("{err:#}"));
                Ok(())
            }
        }
    }

    async fn fetch_panes(&self) -> anyhow::Result<Panes> {
        let current = self
            .provider
            .current(&self.location)
            .await
            .context("Failed to fetch current weather")?;

        let forecast = self
            .provider
            .forecast(&self.location, FORECAST_ENTRIES)
            .await
            .context("Failed to fetch forecast")?;

        Ok(Panes::render(&current, &forecast, self.options))
    }

    pub fn handle_input(&self, event: InputEvent) -> Transition {
        tracing::debug!(?event, "input");

        match event {
            InputEvent::Quit => Transition::Quit,
            InputEvent::Resize { width, height } => Transition::Reflow { width, height },
            InputEvent::Other => Transition::Ignore,
        }
    }

    /// Panes from the last successful refresh, if any.
    pub fn panes(&self) -> Option<&Panes> {
        self.panes.as_ref()
    }

    /// Error from the last refresh, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Host time of the last successful refresh.
    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}
