//! The `techquiz annotate` command, plus the term marking shared with `play`.

use std::path::PathBuf;

use anyhow::Result;

use techquiz_core::glossary::{Glossary, Segment};
use techquiz_providers::config::load_glossary;

pub fn execute(text: &str, glossary_path: Option<PathBuf>) -> Result<()> {
    let glossary = load_glossary(glossary_path.as_deref())?;
    let segments = glossary.annotate(text);

    if segments.is_empty() {
        println!("(empty text)");
        return Ok(());
    }

    for segment in &segments {
        match segment.definition {
            Some(definition) => println!("term   {:?}: {definition}", segment.text),
            None => println!("plain  {:?}", segment.text),
        }
    }

    let terms = segments.iter().filter(|s| s.is_term()).count();
    println!("\n{} segments, {terms} glossary terms", segments.len());
    Ok(())
}

/// Text with glossary terms wrapped in brackets, plus each distinct term's
/// definition in order of first appearance.
pub(crate) fn mark_terms<'a>(glossary: &'a Glossary, text: &'a str) -> (String, Vec<Segment<'a>>) {
    let mut marked = String::with_capacity(text.len() + 16);
    let mut defined: Vec<Segment<'a>> = Vec::new();

    for segment in glossary.annotate(text) {
        if segment.is_term() {
            marked.push('[');
            marked.push_str(segment.text);
            marked.push(']');
            if !defined
                .iter()
                .any(|d| d.text.eq_ignore_ascii_case(segment.text))
            {
                defined.push(segment);
            }
        } else {
            marked.push_str(segment.text);
        }
    }

    (marked, defined)
}

/// Print `text` with marked terms, followed by their definitions.
pub(crate) fn print_marked(glossary: &Glossary, text: &str) {
    let (marked, defined) = mark_terms(glossary, text);
    println!("{marked}");
    print_definitions(&defined);
}

pub(crate) fn print_definitions(defined: &[Segment<'_>]) {
    for term in defined {
        if let Some(definition) = term.definition {
            println!("    {}: {definition}", term.text.to_lowercase());
        }
    }
}
