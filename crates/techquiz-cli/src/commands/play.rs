//! The `techquiz play` command: an interactive quiz in the terminal.
//!
//! The screen is a pure function of the controller's snapshot. Every key the
//! user types becomes an `Intent`; nothing here mutates session state.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use techquiz_core::controller::{Intent, QuizController, QuizHandle};
use techquiz_core::generator::ScenarioGenerator;
use techquiz_core::glossary::{Glossary, Segment};
use techquiz_core::model::{AnswerOption, Level, Scenario};
use techquiz_core::session::{Phase, SessionState, POINTS_PER_CORRECT};
use techquiz_providers::config::{load_config_from, load_glossary};

use super::annotate::{mark_terms, print_definitions, print_marked};

pub async fn execute(
    level: Option<Level>,
    provider: Option<String>,
    model: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let provider = config.provider(provider.as_deref())?;
    let glossary = load_glossary(config.glossary.as_deref())?;
    let generator = ScenarioGenerator::new(provider, config.generator_settings(model.as_deref()));

    let (mut handle, task) = QuizController::spawn(Arc::new(generator));
    let mut prompt = Prompt::new(BufReader::new(tokio::io::stdin()));
    let mut preset = level;

    loop {
        let level = match preset.take() {
            Some(level) => level,
            None => match choose_level(&mut prompt).await? {
                Some(level) => level,
                None => break,
            },
        };

        handle.dispatch(Intent::SelectLevel(level)).await?;
        let (summary, end) = play_session(&mut handle, &glossary, &mut prompt).await?;
        print_summary(&summary);

        if end == SessionEnd::InputClosed {
            break;
        }
    }

    drop(handle);
    task.await.context("quiz controller task failed")?;
    Ok(())
}

/// Line-oriented input with a visible prompt.
pub(crate) struct Prompt<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Show `label` and read one trimmed line; `None` once input is closed.
    pub(crate) async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush().context("failed to flush stdout")?;
        let line = self
            .lines
            .next_line()
            .await
            .context("failed to read from stdin")?;
        if line.is_none() {
            println!();
        }
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// A key typed on the scenario or feedback screen.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Key {
    Option(String),
    Next,
    Exit,
    Unknown,
}

/// Interpret a line for the current phase.
pub(crate) fn parse_key(input: &str, phase: Phase, scenario: Option<&Scenario>) -> Key {
    let input = input.trim();
    if input.eq_ignore_ascii_case("x") {
        return Key::Exit;
    }
    match phase {
        Phase::Presenting => match scenario.and_then(|s| s.option(input)) {
            Some(option) => Key::Option(option.id.clone()),
            None => Key::Unknown,
        },
        Phase::Feedback if input.eq_ignore_ascii_case("n") || input.is_empty() => Key::Next,
        _ => Key::Unknown,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    Exited,
    InputClosed,
}

/// What the session looked like right before it ended.
struct Summary {
    level: Option<Level>,
    questions: u32,
    score: u32,
}

impl From<&SessionState> for Summary {
    fn from(state: &SessionState) -> Self {
        Self {
            level: state.current_level,
            questions: state.question_count,
            score: state.score,
        }
    }
}

async fn choose_level<R: AsyncBufRead + Unpin>(prompt: &mut Prompt<R>) -> Result<Option<Level>> {
    println!();
    println!("Choose your level");
    for level in Level::ALL {
        println!("  [{}] {} ({})", level, level.title(), level.focus());
        for unit in level.units() {
            println!("        - {unit}");
        }
    }

    loop {
        let Some(input) = prompt.ask("Level (A/B/C, q to quit): ").await? else {
            return Ok(None);
        };
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match input.parse::<Level>() {
            Ok(level) => return Ok(Some(level)),
            Err(e) => println!("{e}"),
        }
    }
}

async fn play_session<R: AsyncBufRead + Unpin>(
    handle: &mut QuizHandle,
    glossary: &Glossary,
    prompt: &mut Prompt<R>,
) -> Result<(Summary, SessionEnd)> {
    println!("\nGenerating scenario...");

    loop {
        let state = handle.settled().await?;
        let phase = state.phase();

        match phase {
            Phase::Presenting => render_scenario(&state, glossary),
            Phase::Feedback => render_feedback(&state, glossary),
            // Playing but nothing to show: the scenario request failed outright.
            Phase::Idle | Phase::Loading => {
                println!("The scenario service is unavailable. Returning to the menu.");
                handle.dispatch(Intent::Exit).await?;
                return Ok(((&state).into(), SessionEnd::Exited));
            }
        }

        let label = match phase {
            Phase::Feedback => "Press Enter or n for the next scenario, x to exit: ",
            _ => "Your answer (1-3, x to exit): ",
        };

        loop {
            let Some(input) = prompt.ask(label).await? else {
                handle.dispatch(Intent::Exit).await?;
                return Ok(((&state).into(), SessionEnd::InputClosed));
            };

            match parse_key(&input, phase, state.current_scenario.as_ref()) {
                Key::Option(id) => {
                    handle.dispatch(Intent::SelectOption(id)).await?;
                }
                Key::Next => {
                    handle.dispatch(Intent::Next).await?;
                    println!("\nGenerating scenario...");
                }
                Key::Exit => {
                    handle.dispatch(Intent::Exit).await?;
                    return Ok(((&state).into(), SessionEnd::Exited));
                }
                Key::Unknown => {
                    println!("Unrecognised input: {input:?}");
                    continue;
                }
            }
            break;
        }
    }
}

fn render_header(state: &SessionState) {
    let title = state.current_level.map(|l| l.title()).unwrap_or_default();
    println!();
    println!(
        "== {title} | Question {} | Score {} ==",
        state.question_count, state.score
    );
}

fn render_scenario(state: &SessionState, glossary: &Glossary) {
    let Some(scenario) = &state.current_scenario else {
        return;
    };
    render_header(state);
    println!("Topic: {}", scenario.topic);
    println!();
    print_marked(glossary, &scenario.context);
    println!();
    print_marked(glossary, &scenario.question);
    println!();
    for option in &scenario.options {
        let (line, defined) = option_line(glossary, option);
        println!("{line}");
        print_definitions(&defined);
    }
}

fn option_line<'a>(glossary: &'a Glossary, option: &'a AnswerOption) -> (String, Vec<Segment<'a>>) {
    let (marked, defined) = mark_terms(glossary, &option.text);
    (format!("  {}) {marked}", option.id), defined)
}

fn render_feedback(state: &SessionState, glossary: &Glossary) {
    let Some(scenario) = &state.current_scenario else {
        return;
    };
    render_header(state);
    match state.last_answer_correct {
        Some(true) => println!("Correct! +{POINTS_PER_CORRECT} points"),
        _ => match scenario.correct_option() {
            Some(answer) => println!("Not quite. The correct answer is: {}", answer.text),
            None => println!("Not quite."),
        },
    }
    println!();
    print_marked(glossary, &scenario.feedback);
}

fn print_summary(summary: &Summary) {
    let correct = summary.score / POINTS_PER_CORRECT;

    let mut table = Table::new();
    table.set_header(vec!["Level", "Questions", "Correct", "Score"]);
    table.add_row(vec![
        Cell::new(summary.level.map(|l| l.to_string()).unwrap_or_else(|| "-".into())),
        Cell::new(summary.questions),
        Cell::new(correct),
        Cell::new(summary.score),
    ]);

    println!();
    println!("Session summary");
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_depend_on_phase() {
        let scenario = Scenario::fallback();
        let presenting = |input| parse_key(input, Phase::Presenting, Some(&scenario));
        assert_eq!(presenting("2"), Key::Option("2".into()));
        assert_eq!(presenting(" 3 "), Key::Option("3".into()));
        assert_eq!(presenting("4"), Key::Unknown);
        assert_eq!(presenting("n"), Key::Unknown);
        assert_eq!(presenting("X"), Key::Exit);

        let feedback = |input| parse_key(input, Phase::Feedback, Some(&scenario));
        assert_eq!(feedback("n"), Key::Next);
        assert_eq!(feedback(""), Key::Next);
        assert_eq!(feedback("1"), Key::Unknown);
        assert_eq!(feedback("x"), Key::Exit);
    }

    #[test]
    fn option_text_terms_are_marked() {
        let glossary = Glossary::builtin();
        let option = AnswerOption {
            id: "2".into(),
            text: "Restart the server and check the dashboard.".into(),
            is_correct: false,
        };
        let (line, defined) = option_line(&glossary, &option);
        assert_eq!(line, "  2) Restart the [server] and check the [dashboard].");
        let names: Vec<_> = defined.iter().map(|s| s.text).collect();
        assert_eq!(names, ["server", "dashboard"]);
    }

    #[tokio::test]
    async fn prompt_reads_trimmed_lines_until_eof() {
        let mut prompt = Prompt::new(&b" a \n1\n"[..]);
        assert_eq!(prompt.ask("").await.unwrap().as_deref(), Some("a"));
        assert_eq!(prompt.ask("").await.unwrap().as_deref(), Some("1"));
        assert_eq!(prompt.ask("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn level_menu_retries_and_quits() {
        let mut prompt = Prompt::new(&b"z\nb\n"[..]);
        assert_eq!(choose_level(&mut prompt).await.unwrap(), Some(Level::B));

        let mut prompt = Prompt::new(&b"Q\n"[..]);
        assert_eq!(choose_level(&mut prompt).await.unwrap(), None);

        let mut prompt = Prompt::new(&b""[..]);
        assert_eq!(choose_level(&mut prompt).await.unwrap(), None);
    }
}
