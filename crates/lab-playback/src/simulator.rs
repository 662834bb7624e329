//! Playback simulator
//!
//! Simulates a test run by revealing a scenario's expected output one line
//! per tick. Each run is a tokio task streaming [`PlaybackEvent`]s to the
//! owner over an unbounded channel.
//!
//! # Cancellation
//!
//! Every run is stamped with a fresh [`Generation`] and the scenario id it
//! was started for. Dropping or cancelling the [`PlaybackHandle`] aborts the
//! task; events already queued still carry the old generation, so the
//! receiver must compare generations before applying them.

use crate::error::PlaybackError;
use crate::script::{PlaybackFrame, PlaybackScript};
use lab_catalog::ScenarioId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Default delay between revealed lines
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Playback run identifier, unique per simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playback configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Delay between revealed lines
    pub tick_interval: Duration,
}

impl PlaybackConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With tick interval
    #[inline]
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Check the configuration
    ///
    /// # Errors
    /// Returns `PlaybackError::InvalidInterval` for a zero interval.
    pub fn validate(&self) -> Result<(), PlaybackError> {
        if self.tick_interval.is_zero() {
            return Err(PlaybackError::InvalidInterval(self.tick_interval));
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Messages sent by a running playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// One more line revealed
    Line {
        /// Run that produced the line
        generation: Generation,
        /// Scenario the run was started for
        scenario_id: ScenarioId,
        /// Revealed line and progress
        frame: PlaybackFrame,
    },
    /// Script exhausted; the scenario passed
    Finished {
        /// Run that finished
        generation: Generation,
        /// Scenario the run was started for
        scenario_id: ScenarioId,
    },
}

impl PlaybackEvent {
    /// Run that produced the event
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Generation {
        match self {
            PlaybackEvent::Line { generation, .. } | PlaybackEvent::Finished { generation, .. } => {
                *generation
            }
        }
    }

    /// Scenario the run was started for
    #[inline]
    #[must_use]
    pub fn scenario_id(&self) -> &ScenarioId {
        match self {
            PlaybackEvent::Line { scenario_id, .. } | PlaybackEvent::Finished { scenario_id, .. } => {
                scenario_id
            }
        }
    }
}

/// Handle to one in-flight playback
///
/// Aborts the timer task when cancelled or dropped.
#[derive(Debug)]
pub struct PlaybackHandle {
    generation: Generation,
    scenario_id: ScenarioId,
    task: JoinHandle<()>,
}

impl PlaybackHandle {
    /// Run identifier
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Scenario being played back
    #[inline]
    #[must_use]
    pub fn scenario_id(&self) -> &ScenarioId {
        &self.scenario_id
    }

    /// Whether the timer task has exited
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Whether `event` belongs to this run
    #[inline]
    #[must_use]
    pub fn owns(&self, event: &PlaybackEvent) -> bool {
        event.generation() == self.generation && event.scenario_id() == &self.scenario_id
    }

    /// Stop the run; queued events become stale
    pub fn cancel(self) {
        tracing::debug!(
            generation = %self.generation,
            scenario = %self.scenario_id,
            "playback cancelled"
        );
        // Drop aborts the task
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts playback runs
#[derive(Debug)]
pub struct PlaybackSimulator {
    config: PlaybackConfig,
    next_generation: AtomicU64,
}

impl PlaybackSimulator {
    /// Create a simulator
    ///
    /// # Errors
    /// Returns `PlaybackError::InvalidInterval` for a zero tick interval.
    pub fn new(config: PlaybackConfig) -> Result<Self, PlaybackError> {
        config.validate()?;
        Ok(Self {
            config,
            next_generation: AtomicU64::new(1),
        })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Start revealing `expected_output` into `events`
    ///
    /// The first line arrives one full interval after the call; the
    /// `Finished` event follows the last line on the same tick.
    ///
    /// # Errors
    /// Returns `PlaybackError::NoRuntime` outside a tokio runtime.
    pub fn start(
        &self,
        scenario_id: ScenarioId,
        expected_output: &str,
        events: mpsc::UnboundedSender<PlaybackEvent>,
    ) -> Result<PlaybackHandle, PlaybackError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| PlaybackError::NoRuntime)?;
        let generation = Generation(self.next_generation.fetch_add(1, Ordering::Relaxed));
        let script = PlaybackScript::new(expected_output);
        let period = self.config.tick_interval;
        // Anchored here, not when the task is first polled
        let first_tick = Instant::now() + period;

        tracing::info!(
            generation = %generation,
            scenario = %scenario_id,
            lines = script.len(),
            "playback started"
        );

        let task = runtime.spawn(drive(
            script,
            generation,
            scenario_id.clone(),
            first_tick,
            period,
            events,
        ));

        Ok(PlaybackHandle {
            generation,
            scenario_id,
            task,
        })
    }
}

/// Timer loop of one run
async fn drive(
    script: PlaybackScript,
    generation: Generation,
    scenario_id: ScenarioId,
    first_tick: Instant,
    period: Duration,
    events: mpsc::UnboundedSender<PlaybackEvent>,
) {
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for frame in script.into_cursor() {
        ticker.tick().await;
        let last = frame.is_last();
        let line = PlaybackEvent::Line {
            generation,
            scenario_id: scenario_id.clone(),
            frame,
        };
        if events.send(line).is_err() {
            tracing::debug!(generation = %generation, "playback receiver gone");
            return;
        }
        if last {
            let finished = PlaybackEvent::Finished {
                generation,
                scenario_id: scenario_id.clone(),
            };
            if events.send(finished).is_err() {
                tracing::debug!(generation = %generation, "playback receiver gone before finish");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_rejected() {
        let config = PlaybackConfig::new().with_tick_interval(Duration::ZERO);
        assert_eq!(
            PlaybackSimulator::new(config).unwrap_err(),
            PlaybackError::InvalidInterval(Duration::ZERO)
        );
    }

    #[test]
    fn default_interval_is_150ms() {
        assert_eq!(PlaybackConfig::default().tick_interval, Duration::from_millis(150));
    }

    #[test]
    fn start_outside_runtime_fails() {
        let simulator = PlaybackSimulator::new(PlaybackConfig::default()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = simulator.start("X-1".into(), "a", tx).unwrap_err();
        assert_eq!(err, PlaybackError::NoRuntime);
    }

    #[tokio::test]
    async fn generations_are_unique() {
        let simulator = PlaybackSimulator::new(PlaybackConfig::default()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = simulator.start("X-1".into(), "a", tx.clone()).unwrap();
        let b = simulator.start("X-1".into(), "a", tx).unwrap();
        assert_ne!(a.generation(), b.generation());
    }
}
