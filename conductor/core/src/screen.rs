//! Hero Screen - The Orchestration Core
//!
//! The screen composes the three sub-machines around one [`ScreenState`]:
//! - [`IntroSequencer`]: intro playback, phase switch, orientation lock
//! - [`FeedbackTrigger`]: click cue
//! - [`StatsQueryController`]: two-stage hero lookup
//!
//! # Design Philosophy
//!
//! The screen is surface-agnostic. It doesn't know whether it is rendered by a
//! mobile shell, a terminal, or a test harness. It communicates through:
//! - `ScreenMessage`: what the surface should render
//! - `ScreenEvent`: what the user did
//!
//! All asynchronous work (media, audio, network) runs in spawned tasks and
//! reports back as a [`Completion`] on one channel. Completions are applied one
//! at a time by whoever owns the screen, so state is only ever mutated from a
//! single control flow and needs no locking.
//!
//! Unmounting closes the completion channel. Work still in flight runs to the
//! end but its results have nowhere to go and are dropped.

use tokio::sync::mpsc;

use crate::capabilities::{Capabilities, SoundHandle};
use crate::config::ScreenConfig;
use crate::error::{AudioError, MediaError, ScreenError};
use crate::events::ScreenEvent;
use crate::feedback::FeedbackTrigger;
use crate::intro::{IntroEnd, IntroSequencer, IntroStatus};
use crate::messages::{Alert, ScreenMessage};
use crate::phase::{Panel, ScreenPhase};
use crate::query::{QueryId, QueryState};
use crate::state::ScreenState;
use crate::stats::{Applied, QueryOutcome, StatsQueryController};

/// Completion buffer between spawned work and the screen
const COMPLETION_BUFFER: usize = 64;

/// Result of asynchronous work started by the screen
#[derive(Debug)]
pub enum Completion {
    /// Intro playback ended (or timed out)
    IntroFinished(IntroEnd),
    /// Intro media failed to load or play
    IntroFailed(MediaError),
    /// Feedback cue load finished
    SoundLoaded(Result<SoundHandle, AudioError>),
    /// A hero lookup finished
    Query {
        /// Submission id
        id: QueryId,
        /// Identifier as submitted
        identifier: String,
        /// What the lookup found
        outcome: QueryOutcome,
    },
}

/// Mount lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but not mounted
    Created,
    /// Mounted and observing work
    Mounted,
    /// Resources released, observer detached
    Unmounted,
}

/// The hero-information screen
pub struct HeroScreen {
    /// Configuration
    config: ScreenConfig,
    /// Phase, query, and panel
    state: ScreenState,
    /// Intro sub-machine
    intro: IntroSequencer,
    /// Click cue sub-machine
    feedback: FeedbackTrigger,
    /// Lookup sub-machine
    stats: StatsQueryController,
    /// Channel to the rendering surface
    tx: mpsc::Sender<ScreenMessage>,
    /// Sender handed to spawned work
    completions_tx: mpsc::Sender<Completion>,
    /// Completions waiting to be applied
    completions_rx: mpsc::Receiver<Completion>,
    /// Mount lifecycle
    lifecycle: Lifecycle,
    /// Alert waiting for acknowledgement
    pending_alert: Option<Alert>,
    /// Text field contents
    input: String,
}

impl HeroScreen {
    /// Create a screen from its capabilities
    pub fn new(
        capabilities: Capabilities,
        config: ScreenConfig,
        tx: mpsc::Sender<ScreenMessage>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel(COMPLETION_BUFFER);

        let intro = IntroSequencer::new(
            capabilities.media,
            capabilities.orientation,
            config.intro_source.clone(),
            config.intro_timeout,
        );
        let feedback = FeedbackTrigger::new(capabilities.audio, config.click_sound.clone());
        let stats = StatsQueryController::new(capabilities.roster, config.stale_responses);

        Self {
            config,
            state: ScreenState::new(),
            intro,
            feedback,
            stats,
            tx,
            completions_tx,
            completions_rx,
            lifecycle: Lifecycle::Created,
            pending_alert: None,
            input: String::new(),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Current phase
    pub fn phase(&self) -> ScreenPhase {
        self.state.phase()
    }

    /// Current query state
    pub fn query(&self) -> &QueryState {
        self.state.query()
    }

    /// Busy indicator visibility
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Current hero panel
    pub fn panel(&self) -> Panel {
        self.state.panel()
    }

    /// Alert waiting for acknowledgement
    pub fn pending_alert(&self) -> Option<&Alert> {
        self.pending_alert.as_ref()
    }

    /// Text field contents
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mount lifecycle
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Intro sub-machine status
    pub fn intro_status(&self) -> &IntroStatus {
        self.intro.status()
    }

    /// Whether the click cue is loaded
    pub fn feedback_ready(&self) -> bool {
        self.feedback.is_ready()
    }

    /// Lookups still in flight
    pub fn queries_in_flight(&self) -> usize {
        self.stats.in_flight()
    }

    /// Mount the screen: preload the cue and start the intro
    pub async fn mount(&mut self) -> anyhow::Result<()> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Mounted => {
                tracing::debug!("Screen already mounted");
                return Ok(());
            }
            Lifecycle::Unmounted => return Err(ScreenError::Unmounted.into()),
        }
        self.lifecycle = Lifecycle::Mounted;
        tracing::info!(intro = %self.config.intro_source, "Mounting hero screen");

        self.send(ScreenMessage::Phase {
            phase: self.state.phase(),
        })
        .await;

        self.feedback.preload(&self.completions_tx);
        self.intro.start(&self.completions_tx);
        Ok(())
    }

    /// Handle an event from the surface
    pub async fn handle_event(&mut self, event: ScreenEvent) -> anyhow::Result<()> {
        if self.lifecycle == Lifecycle::Unmounted {
            return Err(ScreenError::Unmounted.into());
        }

        match event {
            ScreenEvent::InputChanged { text } => {
                self.input = text;
            }

            ScreenEvent::Submit { identifier } => {
                let identifier = identifier.unwrap_or_else(|| self.input.clone());
                self.submit(identifier).await;
            }

            ScreenEvent::ToggleStats => {
                match self.state.toggle_panel() {
                    Ok(panel) => {
                        self.feedback.trigger();
                        self.send(ScreenMessage::PanelChanged {
                            panel,
                            toggle_label: panel.toggle_label().to_string(),
                        })
                        .await;
                    }
                    Err(e) => tracing::warn!(error = %e, "Rejected stats toggle"),
                }
            }

            ScreenEvent::AlertAcknowledged => {
                if self.pending_alert.take().is_some() {
                    self.send(ScreenMessage::AlertDismissed).await;
                }
            }

            ScreenEvent::Unmount => {
                self.unmount().await;
            }
        }

        Ok(())
    }

    /// Play the click cue and submit a lookup
    async fn submit(&mut self, identifier: String) {
        if !self.state.phase().is_interactive() {
            tracing::warn!(identifier = %identifier, "Rejected hero lookup during intro");
            return;
        }
        self.feedback.trigger();

        match self
            .stats
            .submit(identifier, &mut self.state, &self.completions_tx)
        {
            Ok(_) => self.publish_query().await,
            Err(e) => tracing::warn!(error = %e, "Rejected hero lookup"),
        }
    }

    /// Apply one completion
    pub async fn handle_completion(&mut self, completion: Completion) {
        if self.lifecycle == Lifecycle::Unmounted {
            self.discard(completion).await;
            return;
        }

        match completion {
            Completion::IntroFinished(end) => {
                if self.intro.on_finished(end, &mut self.state) {
                    tracing::info!(?end, "Intro finished");
                    self.send(ScreenMessage::Phase {
                        phase: self.state.phase(),
                    })
                    .await;
                }
            }

            Completion::IntroFailed(error) => {
                self.intro.on_failed(error);
            }

            Completion::SoundLoaded(result) => {
                self.feedback.on_loaded(result).await;
            }

            Completion::Query {
                id,
                identifier,
                outcome,
            } => match self.stats.apply(id, &identifier, outcome, &mut self.state) {
                Applied::Discarded => {}
                Applied::Updated => self.publish_query().await,
                Applied::NotFoundAlert => {
                    self.publish_query().await;
                    let alert = Alert::hero_not_found(&identifier);
                    self.pending_alert = Some(alert.clone());
                    self.send(ScreenMessage::Alert { alert }).await;
                }
            },
        }
    }

    /// Apply every completion that is already waiting
    ///
    /// Returns true if anything was applied.
    pub async fn poll_completions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.handle_completion(completion).await;
            applied = true;
        }
        applied
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns false once the screen is unmounted and nothing is left.
    pub async fn next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.handle_completion(completion).await;
                true
            }
            None => false,
        }
    }

    /// Drive the screen from a surface event stream until unmount
    ///
    /// Mounts first if needed. A closed event stream counts as unmount.
    pub async fn run(&mut self, mut events: mpsc::Receiver<ScreenEvent>) -> anyhow::Result<()> {
        self.mount().await?;

        while self.lifecycle == Lifecycle::Mounted {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        if let Err(e) = self.handle_event(event).await {
                            tracing::warn!(error = %e, "Surface event failed");
                        }
                    }
                    None => self.unmount().await,
                },
                Some(completion) = self.completions_rx.recv() => {
                    self.handle_completion(completion).await;
                }
            }
        }

        Ok(())
    }

    /// Unmount: release the cue and stop observing in-flight work
    pub async fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;

        // Spawned work now fails to deliver and drops its results
        self.completions_rx.close();
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.discard(completion).await;
        }

        self.feedback.release().await;
        tracing::info!(
            queries_in_flight = self.stats.in_flight(),
            "Hero screen unmounted"
        );
        self.send(ScreenMessage::Unmounted).await;
    }

    /// Drop a completion nobody observes, releasing any resource it carries
    async fn discard(&mut self, completion: Completion) {
        match completion {
            Completion::SoundLoaded(result) => self.feedback.on_loaded(result).await,
            other => tracing::trace!(completion = ?other, "Discarding completion after unmount"),
        }
    }

    /// Send query state and busy indicator
    async fn publish_query(&self) {
        self.send(ScreenMessage::Query {
            state: self.state.query().clone(),
        })
        .await;
        self.send(ScreenMessage::Busy {
            visible: self.state.is_busy(),
        })
        .await;
    }

    /// Send a message to the surface
    async fn send(&self, msg: ScreenMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
