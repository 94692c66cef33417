//! Core data model types for techquiz.
//!
//! Levels, topics, answer options and scenarios: the vocabulary shared by the
//! generator, the session state machine and the presentation layer.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course level. Each level is bound to its own block of reference material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    A,
    B,
    C,
}

impl Level {
    /// All levels in menu order.
    pub const ALL: [Level; 3] = [Level::A, Level::B, Level::C];

    /// Menu title for this level.
    pub fn title(&self) -> &'static str {
        match self {
            Level::A => "Level A: EJE 3",
            Level::B => "Level B: EJE 4",
            Level::C => "Level C: EJE Future",
        }
    }

    /// One-line focus summary shown under the title.
    pub fn focus(&self) -> &'static str {
        match self {
            Level::A => "Actions in Progress & Descriptions",
            Level::B => "Past Events & Obligations",
            Level::C => "Future Plans & Purpose",
        }
    }

    /// Grammar units covered by this level.
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Level::A => &[
                "Present Continuous (Alex's Day)",
                "Prepositions (Time/Place)",
                "Countable/Uncountable & Quantifiers",
            ],
            Level::B => &[
                "Past Simple (Laura's Day)",
                "Past Continuous (Agile Morning)",
                "Modals (Must, Should, Can)",
            ],
            Level::C => &[
                "Will vs Going To (AI Future)",
                "Prepositions (To vs For)",
                "Present Continuous for Future",
            ],
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::A => write!(f, "A"),
            Level::B => write!(f, "B"),
            Level::C => write!(f, "C"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Level::A),
            "B" => Ok(Level::B),
            "C" => Ok(Level::C),
            other => Err(format!("unknown level: {other} (expected A, B or C)")),
        }
    }
}

/// Technical field a scenario is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Software,
    IndustrialSafety,
    Logistics,
    Mechatronics,
    BusinessAdministration,
}

impl Topic {
    /// The fixed, ordered topic set.
    pub const ALL: [Topic; 5] = [
        Topic::Software,
        Topic::IndustrialSafety,
        Topic::Logistics,
        Topic::Mechatronics,
        Topic::BusinessAdministration,
    ];

    /// Label used in the generation prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Software => "IT & Software Development (Alex, Laura)",
            Topic::IndustrialSafety => "Industrial Safety & Hygiene (PPE, Regulations)",
            Topic::Logistics => "Logistics & Supply Chain (Warehousing, Transport)",
            Topic::Mechatronics => "Mechatronics & Automation (Robots, Sensors)",
            Topic::BusinessAdministration => "Business Administration (Meetings, Budgets)",
        }
    }

    /// Pick a topic uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Topic {
        *Self::ALL.choose(rng).unwrap_or(&Topic::Software)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One answer choice of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Identifier, unique within its scenario.
    pub id: String,
    /// Text shown to the learner.
    pub text: String,
    /// Whether this is the correct answer.
    pub is_correct: bool,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Short professional situation the question is set in.
    pub context: String,
    /// The question itself.
    pub question: String,
    /// Answer choices, in display order.
    pub options: Vec<AnswerOption>,
    /// Explanation citing the grammar rule behind the correct answer.
    pub feedback: String,
    /// Technical topic, as reported by the generator.
    pub topic: String,
}

impl Scenario {
    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// The option marked correct, if any.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    /// The scenario served whenever generation fails for any reason.
    pub fn fallback() -> Self {
        Self {
            context: "Connection to the AI Scenario Generator interrupted.".into(),
            question: "Which action is correct to try again?".into(),
            options: vec![
                AnswerOption {
                    id: "1".into(),
                    text: "We are retrying the connection.".into(),
                    is_correct: true,
                },
                AnswerOption {
                    id: "2".into(),
                    text: "We retries the connection.".into(),
                    is_correct: false,
                },
                AnswerOption {
                    id: "3".into(),
                    text: "We to retry the connection.".into(),
                    is_correct: false,
                },
            ],
            feedback: "Use Present Continuous (are retrying) for actions happening right now."
                .into(),
            topic: "System Error".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::A.to_string(), "A");
        assert_eq!("b".parse::<Level>().unwrap(), Level::B);
        assert_eq!(" C ".parse::<Level>().unwrap(), Level::C);
        assert!("d".parse::<Level>().is_err());
    }

    #[test]
    fn level_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Level::C).unwrap(), "\"C\"");
    }

    #[test]
    fn random_topic_covers_the_whole_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Topic::random(&mut rng));
        }
        assert_eq!(seen.len(), Topic::ALL.len());
    }

    #[test]
    fn fallback_matches_published_literal() {
        let expected = serde_json::json!({
            "context": "Connection to the AI Scenario Generator interrupted.",
            "question": "Which action is correct to try again?",
            "topic": "System Error",
            "options": [
                {"id": "1", "text": "We are retrying the connection.", "isCorrect": true},
                {"id": "2", "text": "We retries the connection.", "isCorrect": false},
                {"id": "3", "text": "We to retry the connection.", "isCorrect": false}
            ],
            "feedback": "Use Present Continuous (are retrying) for actions happening right now."
        });
        assert_eq!(serde_json::to_value(Scenario::fallback()).unwrap(), expected);
    }

    #[test]
    fn option_lookup() {
        let scenario = Scenario::fallback();
        assert_eq!(scenario.option("2").map(|o| o.is_correct), Some(false));
        assert!(scenario.option("9").is_none());
        assert_eq!(scenario.correct_option().map(|o| o.id.as_str()), Some("1"));
    }
}
