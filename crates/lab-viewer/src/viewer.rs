//! Per-lab viewer state
//!
//! `ScenarioViewer` owns everything one lab page shows: filter criteria, the
//! selected scenario with its editable buffers, the playback output and the
//! transient status book. It is single-owner state mutated through `&mut self`.
//!
//! # Playback
//!
//! `run` spawns one timer task through [`PlaybackSimulator`]; its events land
//! in a channel owned by the viewer and are applied by [`ScenarioViewer::poll_events`]
//! or [`ScenarioViewer::next_event`]. Only events whose generation matches
//! the current handle are applied, so selecting another scenario or stopping
//! never lets a cancelled run write into the new state. Dropping the viewer
//! drops the handle, which aborts the task.

use crate::clipboard::Clipboard;
use crate::error::ViewerError;
use lab_catalog::{
    Catalog, CatalogFilter, CatalogSummary, DifficultyFilter, Scenario, StatusBook, StatusFilter,
};
use lab_playback::{PlaybackConfig, PlaybackEvent, PlaybackHandle, PlaybackSimulator};
use std::sync::Arc;
use tokio::sync::mpsc;

/// State of one lab view
#[derive(Debug)]
pub struct ScenarioViewer {
    catalog: Arc<Catalog>,
    simulator: PlaybackSimulator,
    filter: CatalogFilter,
    selected: Scenario,
    code: String,
    config: String,
    show_config: bool,
    output: String,
    progress: u8,
    running: bool,
    statuses: StatusBook,
    playback: Option<PlaybackHandle>,
    events_tx: mpsc::UnboundedSender<PlaybackEvent>,
    events_rx: mpsc::UnboundedReceiver<PlaybackEvent>,
}

impl ScenarioViewer {
    /// Open a view on `catalog`
    ///
    /// The first tab is active and the first scenario is selected.
    ///
    /// # Errors
    /// Returns `ViewerError::Playback` for an invalid playback config.
    pub fn new(catalog: Arc<Catalog>, playback: PlaybackConfig) -> Result<Self, ViewerError> {
        let simulator = PlaybackSimulator::new(playback)?;
        let filter = CatalogFilter::new(catalog.first_tab().key.clone());
        let selected = catalog.first().clone();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        tracing::debug!(lab = catalog.key(), scenario = %selected.id, "viewer opened");

        Ok(Self {
            code: selected.code.clone(),
            config: selected.config.clone(),
            catalog,
            simulator,
            filter,
            selected,
            show_config: false,
            output: String::new(),
            progress: 0,
            running: false,
            statuses: StatusBook::new(),
            playback: None,
            events_tx,
            events_rx,
        })
    }

    // ---------------------------------------------------------------------
    // Filter
    // ---------------------------------------------------------------------

    /// Visible scenarios, in catalog order
    #[must_use]
    pub fn filtered(&self) -> Vec<&Scenario> {
        self.filter.apply_with_status(&self.catalog, &self.statuses)
    }

    /// Switch the active tab; the selection is kept
    ///
    /// # Errors
    /// Returns `ViewerError::UnknownTab` if the catalog does not declare `tab`.
    pub fn set_tab(&mut self, tab: &str) -> Result<(), ViewerError> {
        let tab = self
            .catalog
            .tab(tab)
            .ok_or_else(|| ViewerError::UnknownTab(tab.into()))?;
        self.filter.tab = tab.key.clone();
        tracing::debug!(tab = %self.filter.tab, "tab switched");
        Ok(())
    }

    /// Set the difficulty criterion
    pub fn set_difficulty(&mut self, difficulty: impl Into<DifficultyFilter>) {
        self.filter.difficulty = difficulty.into();
    }

    /// Set the search text
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Set the status criterion
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Select a scenario
    ///
    /// Cancels any playback, reseeds both buffers and clears the output,
    /// even when `id` is already selected.
    ///
    /// # Errors
    /// Returns `ViewerError::UnknownScenario` if `id` is not in the catalog;
    /// the view is left untouched.
    pub fn select(&mut self, id: &str) -> Result<(), ViewerError> {
        let scenario = self
            .catalog
            .get(id)
            .ok_or_else(|| ViewerError::UnknownScenario(id.into()))?
            .clone();

        self.cancel_playback();
        self.code.clone_from(&scenario.code);
        self.config.clone_from(&scenario.config);
        self.selected = scenario;
        self.output.clear();
        self.progress = 0;
        self.running = false;

        tracing::debug!(scenario = %self.selected.id, "scenario selected");
        Ok(())
    }

    /// Restore the code and config buffers from the selected scenario
    pub fn reset(&mut self) {
        self.code.clone_from(&self.selected.code);
        self.config.clone_from(&self.selected.config);
        tracing::debug!(scenario = %self.selected.id, "buffers reset");
    }

    /// Replace the code buffer
    pub fn edit_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Replace the config buffer
    pub fn edit_config(&mut self, config: impl Into<String>) {
        self.config = config.into();
    }

    /// Show or hide the config panel; returns the new state
    pub fn toggle_config(&mut self) -> bool {
        self.show_config = !self.show_config;
        self.show_config
    }

    /// Copy the code buffer to `clipboard`
    ///
    /// Failures are logged and swallowed. Returns whether the copy succeeded.
    pub fn copy_code(&self, clipboard: &dyn Clipboard) -> bool {
        match clipboard.write_text(&self.code) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "copy failed");
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Playback
    // ---------------------------------------------------------------------

    /// Start playback of the selected scenario
    ///
    /// Returns `false` without touching any state if a playback is already
    /// running.
    ///
    /// # Errors
    /// Returns `ViewerError::Playback` outside a tokio runtime.
    pub fn run(&mut self) -> Result<bool, ViewerError> {
        if self.running {
            return Ok(false);
        }

        let handle = self.simulator.start(
            self.selected.id.clone(),
            &self.selected.expected_output,
            self.events_tx.clone(),
        )?;

        self.playback = Some(handle);
        self.running = true;
        self.output.clear();
        self.progress = 0;
        Ok(true)
    }

    /// Stop the current playback, keeping the partial output
    ///
    /// Returns whether a playback was running. The status is not changed.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.cancel_playback();
        self.running = false;
        was_running
    }

    /// Apply one playback event; stale events are ignored
    ///
    /// Returns whether the event was applied.
    pub fn apply_event(&mut self, event: &PlaybackEvent) -> bool {
        let current = self
            .playback
            .as_ref()
            .is_some_and(|handle| handle.owns(event));
        if !current {
            tracing::debug!(generation = %event.generation(), "stale playback event dropped");
            return false;
        }

        match event {
            PlaybackEvent::Line { frame, .. } => {
                if frame.index > 0 {
                    self.output.push('\n');
                }
                self.output.push_str(&frame.line);
                self.progress = frame.progress;
            }
            PlaybackEvent::Finished { scenario_id, .. } => {
                if let Err(err) = self.statuses.mark_passed(&self.catalog, scenario_id) {
                    tracing::warn!(error = %err, "could not record status");
                }
                self.running = false;
                self.playback = None;
                tracing::info!(scenario = %scenario_id, "scenario passed");
            }
        }
        true
    }

    /// Apply every event already queued; returns how many were applied
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply_event(&event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next applied event of the current run
    ///
    /// Returns `None` once nothing is running.
    pub async fn next_event(&mut self) -> Option<PlaybackEvent> {
        while self.running {
            let event = self.events_rx.recv().await?;
            if self.apply_event(&event) {
                return Some(event);
            }
        }
        None
    }

    /// Run the selected scenario and wait until it passes
    ///
    /// # Errors
    /// As [`ScenarioViewer::run`].
    pub async fn run_to_completion(&mut self) -> Result<(), ViewerError> {
        self.run()?;
        while self.next_event().await.is_some() {}
        Ok(())
    }

    fn cancel_playback(&mut self) {
        if let Some(handle) = self.playback.take() {
            handle.cancel();
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Catalog behind this view
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current filter criteria
    #[inline]
    #[must_use]
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Selected scenario
    #[inline]
    #[must_use]
    pub fn selected(&self) -> &Scenario {
        &self.selected
    }

    /// Code buffer
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Config buffer
    #[inline]
    #[must_use]
    pub fn config_text(&self) -> &str {
        &self.config
    }

    /// Whether the config panel is shown
    #[inline]
    #[must_use]
    pub fn show_config(&self) -> bool {
        self.show_config
    }

    /// Output revealed so far
    #[inline]
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Playback progress in whole percent
    #[inline]
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Whether a playback is in flight
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Status book
    #[inline]
    #[must_use]
    pub fn statuses(&self) -> &StatusBook {
        &self.statuses
    }

    /// Stats bar for the active tab
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::compute(&self.catalog, &self.statuses, &self.filter.tab)
    }
}
