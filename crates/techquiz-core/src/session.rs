//! Quiz session state machine.
//!
//! `Session` is the single owner of `SessionState`. Every request for a new
//! scenario is tagged with a `LoadTicket` carrying the session epoch at issue
//! time; a resolution is applied only while that epoch is still current, so a
//! request that completes after `exit` (or after a newer request) is dropped.

use serde::{Deserialize, Serialize};

use crate::model::{Level, Scenario};

/// Points awarded for a correct answer.
pub const POINTS_PER_CORRECT: u32 = 100;

/// Snapshot of the session, as read by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_level: Option<Level>,
    pub score: u32,
    pub question_count: u32,
    pub is_playing: bool,
    /// Never set; kept so snapshots keep their published shape.
    pub game_over: bool,
    pub loading: bool,
    pub current_scenario: Option<Scenario>,
    pub feedback_visible: bool,
    pub last_answer_correct: Option<bool>,
}

impl SessionState {
    /// The idle shape: no level, no scenario, nothing in flight.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if !self.is_playing {
            Phase::Idle
        } else if self.loading {
            Phase::Loading
        } else if self.feedback_visible {
            Phase::Feedback
        } else if self.current_scenario.is_some() {
            Phase::Presenting
        } else {
            Phase::Idle
        }
    }
}

/// Coarse state derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Level selection. Also reached when a load fails without a scenario.
    Idle,
    /// A scenario request is in flight.
    Loading,
    /// A scenario is shown and awaits an answer.
    Presenting,
    /// The answer has been given and feedback is shown.
    Feedback,
}

/// Identifies one outstanding scenario request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    level: Level,
}

impl LoadTicket {
    /// Level the scenario must be generated for.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// The session state machine.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Start a session at `level`. Ignored unless the session is idle.
    pub fn select_level(&mut self, level: Level) -> Option<LoadTicket> {
        if self.phase() != Phase::Idle {
            tracing::debug!(%level, "level selection ignored outside idle");
            return None;
        }
        self.state = SessionState {
            current_level: Some(level),
            is_playing: true,
            loading: true,
            ..SessionState::idle()
        };
        Some(self.issue(level))
    }

    /// Answer the current scenario with the option `option_id`.
    ///
    /// Returns `true` if the answer was recorded. Answers outside the
    /// presenting phase, and unknown option ids, are ignored.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.phase() != Phase::Presenting {
            return false;
        }
        let Some(is_correct) = self
            .state
            .current_scenario
            .as_ref()
            .and_then(|s| s.option(option_id))
            .map(|o| o.is_correct)
        else {
            tracing::debug!(option_id, "unknown option ignored");
            return false;
        };

        self.state.feedback_visible = true;
        self.state.last_answer_correct = Some(is_correct);
        if is_correct {
            self.state.score += POINTS_PER_CORRECT;
        }
        true
    }

    /// Request the next scenario. Only valid while feedback is shown.
    ///
    /// The previous scenario stays in the state until the new one arrives.
    pub fn next(&mut self) -> Option<LoadTicket> {
        if self.phase() != Phase::Feedback {
            return None;
        }
        let level = self.state.current_level?;
        self.state.feedback_visible = false;
        self.state.last_answer_correct = None;
        self.state.loading = true;
        Some(self.issue(level))
    }

    /// Reset to idle. Any outstanding request becomes stale.
    pub fn exit(&mut self) {
        self.epoch += 1;
        self.state = SessionState::idle();
    }

    /// Apply a generated scenario. Returns `false` if the ticket is stale.
    pub fn scenario_ready(&mut self, ticket: LoadTicket, scenario: Scenario) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(epoch = ticket.epoch, "discarding stale scenario");
            return false;
        }
        self.state.current_scenario = Some(scenario);
        self.state.loading = false;
        self.state.question_count += 1;
        true
    }

    /// Record that a request failed without producing any scenario.
    ///
    /// Loading stops and no scenario is shown; score and level are kept so
    /// the caller can report them, but the session is back at level
    /// selection.
    ///
    /// The published state is not `SessionState::idle()`: `is_playing` stays
    /// true and `current_level` stays set, while `phase()` reports Idle
    /// because there is neither a scenario nor a pending load.
    pub fn scenario_failed(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(epoch = ticket.epoch, "discarding stale failure");
            return false;
        }
        self.state.loading = false;
        self.state.current_scenario = None;
        self.state.feedback_visible = false;
        self.state.last_answer_correct = None;
        true
    }

    fn issue(&mut self, level: Level) -> LoadTicket {
        self.epoch += 1;
        LoadTicket {
            epoch: self.epoch,
            level,
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.epoch == self.epoch && self.state.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;

    fn scenario(tag: &str) -> Scenario {
        Scenario {
            context: format!("{tag} context"),
            question: "Which is right?".into(),
            options: vec![
                AnswerOption {
                    id: "a".into(),
                    text: "wrong".into(),
                    is_correct: false,
                },
                AnswerOption {
                    id: "b".into(),
                    text: "right".into(),
                    is_correct: true,
                },
                AnswerOption {
                    id: "c".into(),
                    text: "also wrong".into(),
                    is_correct: false,
                },
            ],
            feedback: "Because.".into(),
            topic: "Test".into(),
        }
    }

    fn presenting() -> Session {
        let mut session = Session::new();
        let ticket = session.select_level(Level::A).unwrap();
        assert!(session.scenario_ready(ticket, scenario("first")));
        session
    }

    fn assert_invariants(session: &Session) {
        let s = session.state();
        if s.feedback_visible {
            assert!(s.current_scenario.is_some());
            assert!(s.last_answer_correct.is_some());
        }
        if !s.is_playing {
            assert!(s.current_level.is_none());
            assert!(s.current_scenario.is_none());
        }
        assert!(!s.game_over);
    }

    #[test]
    fn starts_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.state(), &SessionState::idle());
    }

    #[test]
    fn select_level_starts_loading() {
        let mut session = Session::new();
        let ticket = session.select_level(Level::B).unwrap();
        assert_eq!(ticket.level(), Level::B);
        assert_eq!(session.phase(), Phase::Loading);
        let s = session.state();
        assert_eq!(s.current_level, Some(Level::B));
        assert!(s.is_playing && s.loading);
        assert_eq!((s.score, s.question_count), (0, 0));
        assert_invariants(&session);
    }

    #[test]
    fn first_load_presents_question_one() {
        let session = presenting();
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.state().question_count, 1);
        assert_eq!(session.state().score, 0);
        assert!(!session.state().loading);
        assert_invariants(&session);
    }

    #[test]
    fn correct_answer_scores_100() {
        let mut session = presenting();
        assert!(session.select_option("b"));
        assert_eq!(session.phase(), Phase::Feedback);
        assert_eq!(session.state().score, 100);
        assert_eq!(session.state().last_answer_correct, Some(true));
        assert_invariants(&session);
    }

    #[test]
    fn wrong_answer_scores_nothing() {
        let mut session = presenting();
        assert!(session.select_option("a"));
        assert_eq!(session.phase(), Phase::Feedback);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().last_answer_correct, Some(false));
    }

    #[test]
    fn second_answer_is_ignored() {
        let mut session = presenting();
        session.select_option("b");
        let before = session.state().clone();
        assert!(!session.select_option("b"));
        assert!(!session.select_option("a"));
        assert_eq!(session.state(), &before);
        assert_eq!(session.phase(), Phase::Feedback);
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut session = presenting();
        assert!(!session.select_option("zzz"));
        assert_eq!(session.phase(), Phase::Presenting);
    }

    #[test]
    fn answer_without_scenario_is_ignored() {
        let mut session = Session::new();
        assert!(!session.select_option("b"));
        session.select_level(Level::A);
        assert!(!session.select_option("b"));
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn next_keeps_previous_scenario_until_resolved() {
        let mut session = presenting();
        session.select_option("b");
        let ticket = session.next().unwrap();
        assert_eq!(session.phase(), Phase::Loading);
        let s = session.state();
        assert!(!s.feedback_visible);
        assert_eq!(s.last_answer_correct, None);
        assert_eq!(
            s.current_scenario.as_ref().map(|c| c.context.as_str()),
            Some("first context")
        );

        assert!(session.scenario_ready(ticket, scenario("second")));
        assert_eq!(session.state().question_count, 2);
        assert_eq!(session.state().score, 100);
        assert_eq!(
            session.state().current_scenario.as_ref().map(|c| c.context.as_str()),
            Some("second context")
        );
    }

    #[test]
    fn next_outside_feedback_is_ignored() {
        let mut session = presenting();
        assert!(session.next().is_none());
        assert_eq!(session.phase(), Phase::Presenting);
    }

    #[test]
    fn select_level_while_playing_is_ignored() {
        let mut session = presenting();
        assert!(session.select_level(Level::C).is_none());
        assert_eq!(session.state().current_level, Some(Level::A));
    }

    #[test]
    fn exit_resets_from_every_phase() {
        let idle = serde_json::json!({
            "currentLevel": null,
            "score": 0,
            "questionCount": 0,
            "isPlaying": false,
            "gameOver": false,
            "loading": false,
            "currentScenario": null,
            "feedbackVisible": false,
            "lastAnswerCorrect": null
        });

        let mut loading = Session::new();
        loading.select_level(Level::A);

        let mut feedback = presenting();
        feedback.select_option("b");

        for mut session in [loading, presenting(), feedback] {
            session.exit();
            assert_eq!(session.phase(), Phase::Idle);
            assert_eq!(serde_json::to_value(session.state()).unwrap(), idle);
        }
    }

    #[test]
    fn stale_result_after_exit_is_discarded() {
        let mut session = Session::new();
        let ticket = session.select_level(Level::A).unwrap();
        session.exit();
        assert!(!session.scenario_ready(ticket, scenario("late")));
        assert_eq!(session.state(), &SessionState::idle());
    }

    #[test]
    fn stale_result_from_previous_session_is_discarded() {
        let mut session = Session::new();
        let old = session.select_level(Level::A).unwrap();
        session.exit();
        let fresh = session.select_level(Level::C).unwrap();
        assert!(!session.scenario_ready(old, scenario("old")));
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.scenario_ready(fresh, scenario("fresh")));
        assert_eq!(session.state().question_count, 1);
        assert_eq!(session.state().current_level, Some(Level::C));
    }

    #[test]
    fn duplicate_resolution_is_applied_once() {
        let mut session = Session::new();
        let ticket = session.select_level(Level::A).unwrap();
        assert!(session.scenario_ready(ticket, scenario("one")));
        assert!(!session.scenario_ready(ticket, scenario("two")));
        assert_eq!(session.state().question_count, 1);
    }

    #[test]
    fn fatal_failure_returns_to_idle_without_counting() {
        let mut session = Session::new();
        let ticket = session.select_level(Level::A).unwrap();
        assert!(session.scenario_failed(ticket));
        assert_eq!(session.phase(), Phase::Idle);
        let s = session.state();
        assert!(!s.loading);
        assert!(s.current_scenario.is_none());
        assert_eq!(s.question_count, 0);
        assert!(s.is_playing);
        assert_eq!(s.current_level, Some(Level::A));
        assert_ne!(*s, SessionState::idle());
        assert_invariants(&session);

        // A new session can be started from here.
        assert!(session.select_level(Level::B).is_some());
    }

    #[test]
    fn fatal_failure_on_next_drops_previous_scenario() {
        let mut session = presenting();
        session.select_option("b");
        let ticket = session.next().unwrap();
        assert!(session.scenario_failed(ticket));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.state().question_count, 1);
        assert_eq!(session.state().score, 100);
        assert!(!session.select_option("b"));
    }
}
