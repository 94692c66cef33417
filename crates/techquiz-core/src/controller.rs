//! Quiz controller.
//!
//! Runs a `Session` inside a single tokio task. Intents arrive over an mpsc
//! channel, scenario requests run as spawned tasks that report back over a
//! second channel, and every processed message publishes a fresh snapshot on
//! a watch channel. The controller task is the only writer of the session.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::SessionError;
use crate::model::{Level, Scenario};
use crate::session::{LoadTicket, Session, SessionState};
use crate::traits::ScenarioSource;

const COMMAND_BUFFER: usize = 32;

/// A user intent forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectLevel(Level),
    /// Answer with the option carrying this id.
    SelectOption(String),
    Next,
    Exit,
}

struct Command {
    intent: Intent,
    ack: oneshot::Sender<SessionState>,
}

struct Completion {
    ticket: LoadTicket,
    outcome: anyhow::Result<Scenario>,
}

/// Presentation-side handle to a running controller.
#[derive(Clone)]
pub struct QuizHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionState>,
}

impl QuizHandle {
    /// Send an intent and return the state right after it was applied.
    pub async fn dispatch(&self, intent: Intent) -> Result<SessionState, SessionError> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command { intent, ack })
            .await
            .map_err(|_| SessionError::ControllerStopped)?;
        applied.await.map_err(|_| SessionError::ControllerStopped)
    }

    /// The latest published state.
    pub fn snapshot(&self) -> SessionState {
        self.snapshots.borrow().clone()
    }

    /// Wait until no scenario request is in flight.
    pub async fn settled(&mut self) -> Result<SessionState, SessionError> {
        let state = self
            .snapshots
            .wait_for(|s| !s.loading)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;
        Ok(state.clone())
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.clone()
    }
}

/// Owns the session and drives scenario generation.
pub struct QuizController {
    session: Session,
    source: Arc<dyn ScenarioSource>,
    commands: mpsc::Receiver<Command>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    snapshots: watch::Sender<SessionState>,
}

impl QuizController {
    /// Start a controller on the current runtime.
    ///
    /// The task ends once every `QuizHandle` has been dropped.
    pub fn spawn(source: Arc<dyn ScenarioSource>) -> (QuizHandle, JoinHandle<()>) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshots_rx) = watch::channel(SessionState::idle());

        let controller = Self {
            session: Session::new(),
            source,
            commands,
            completions_tx,
            completions_rx,
            snapshots,
        };
        let task = tokio::spawn(controller.run());

        let handle = QuizHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(Command { intent, ack }) = command else {
                        break;
                    };
                    self.apply(intent);
                    self.publish();
                    let _ = ack.send(self.session.state().clone());
                }
                Some(completion) = self.completions_rx.recv() => {
                    self.complete(completion);
                    self.publish();
                }
            }
        }
        tracing::debug!("quiz controller stopped");
    }

    fn apply(&mut self, intent: Intent) {
        tracing::debug!(?intent, "applying intent");
        match intent {
            Intent::SelectLevel(level) => {
                if let Some(ticket) = self.session.select_level(level) {
                    self.issue(ticket);
                }
            }
            Intent::SelectOption(id) => {
                self.session.select_option(&id);
            }
            Intent::Next => {
                if let Some(ticket) = self.session.next() {
                    self.issue(ticket);
                }
            }
            Intent::Exit => self.session.exit(),
        }
    }

    fn complete(&mut self, Completion { ticket, outcome }: Completion) {
        match outcome {
            Ok(scenario) => {
                self.session.scenario_ready(ticket, scenario);
            }
            Err(e) => {
                tracing::error!(level = %ticket.level(), "scenario request failed: {e:#}");
                self.session.scenario_failed(ticket);
            }
        }
    }

    fn issue(&self, ticket: LoadTicket) {
        let source = Arc::clone(&self.source);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move { source.next_scenario(ticket.level()).await });
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(anyhow::anyhow!("scenario task aborted: {join_err}")),
            };
            // The controller may already be gone; nothing left to update then.
            let _ = completions.send(Completion { ticket, outcome });
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.state().clone());
    }
}
