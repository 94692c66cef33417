//! Technical glossary and text annotation.
//!
//! Scans free text for glossary terms and splits it into plain and annotated
//! segments. Matching is case-insensitive, respects word boundaries, and
//! always prefers the longest term at a position ("supply chain" over
//! "chain").

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::GlossaryError;

/// Built-in definitions for the vocabulary of the course material.
const BUILTIN_TERMS: &[(&str, &str)] = &[
    ("algorithm", "A step-by-step set of rules a computer follows to solve a problem."),
    ("audit", "An official inspection of records or processes to check they follow the rules."),
    ("automation", "Using machines or software to do work without human effort."),
    ("boots", "Safety footwear with protective toe caps, part of PPE."),
    ("bug", "An error in software that makes it behave incorrectly."),
    ("cloud computing", "Using remote servers on the internet to store and process data."),
    ("compliance", "Following the laws, regulations and standards that apply to a job."),
    ("dashboard", "A screen that shows key information and metrics at a glance."),
    ("data mining", "Searching large data sets to find patterns and useful information."),
    ("developer", "A person who writes and maintains software."),
    ("drill", "A practice exercise for an emergency, such as a fire evacuation."),
    ("firewall", "A security system that controls network traffic to block attacks."),
    ("forklift", "A small vehicle with a lifting platform used to move heavy loads."),
    ("goggles", "Protective glasses that seal around the eyes."),
    ("hazard", "Anything that can cause harm, such as a chemical or biological agent."),
    ("helmet", "A hard hat that protects the head from falling objects."),
    ("incident", "An unexpected event that causes or could cause damage or injury."),
    ("logistics", "Planning and managing the movement and storage of goods."),
    ("maintenance", "Work done to keep machines and systems in good condition."),
    ("ppe", "Personal Protective Equipment: gear worn to reduce exposure to hazards."),
    ("sensor", "A device that detects a physical change and reports it as data."),
    ("server", "A computer that provides data or services to other computers."),
    ("supply chain", "The network of suppliers, factories and transport that delivers a product."),
    ("workflow", "The ordered sequence of tasks needed to complete a piece of work."),
];

/// One piece of annotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text exactly as it appeared in the input.
    pub text: &'a str,
    /// Definition when this segment is a glossary term.
    pub definition: Option<&'a str>,
}

impl Segment<'_> {
    /// Whether this segment is a glossary term.
    pub fn is_term(&self) -> bool {
        self.definition.is_some()
    }
}

/// A term dictionary.
#[derive(Debug, Clone)]
pub struct Glossary {
    /// Lowercase term → definition.
    terms: BTreeMap<String, String>,
    /// Keys of `terms` ordered longest first.
    by_length: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlGlossary {
    #[serde(default)]
    terms: BTreeMap<String, String>,
}

impl Default for Glossary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Glossary {
    /// The technical glossary covering the course vocabulary.
    pub fn builtin() -> Self {
        Self::from_terms(
            BUILTIN_TERMS
                .iter()
                .map(|(term, definition)| (term.to_string(), definition.to_string())),
        )
    }

    /// Build a glossary from term/definition pairs. Terms are lowercased;
    /// later duplicates win.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut glossary = Self {
            terms: BTreeMap::new(),
            by_length: Vec::new(),
        };
        glossary.extend(terms);
        glossary
    }

    /// Parse a glossary from TOML:
    ///
    /// ```toml
    /// [terms]
    /// server = "A computer that provides services to others."
    /// "supply chain" = "The network that delivers a product."
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, GlossaryError> {
        let parsed: TomlGlossary = toml::from_str(content)?;
        if parsed.terms.keys().any(|k| k.trim().is_empty()) {
            return Err(GlossaryError::BlankTerm);
        }
        Ok(Self::from_terms(parsed.terms))
    }

    /// Add or replace terms.
    pub fn extend<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (term, definition) in terms {
            let key = term.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            self.terms.insert(key, definition);
        }
        self.by_length = self.terms.keys().cloned().collect();
        // Stable sort keeps alphabetical order among equal lengths.
        self.by_length.sort_by_key(|term| std::cmp::Reverse(term.chars().count()));
    }

    /// Definition of a term, matched case-insensitively.
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.terms.get(&term.to_lowercase()).map(String::as_str)
    }

    /// All terms with their definitions, alphabetically.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Split `text` into plain and term segments.
    ///
    /// Empty input yields no segments. Empty gaps between adjacent terms (or
    /// at either end) are not emitted.
    pub fn annotate<'a>(&'a self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut pos = 0;

        while pos < text.len() {
            if let Some((end, definition)) = self.match_at(text, pos) {
                if plain_start < pos {
                    segments.push(Segment {
                        text: &text[plain_start..pos],
                        definition: None,
                    });
                }
                segments.push(Segment {
                    text: &text[pos..end],
                    definition: Some(definition),
                });
                pos = end;
                plain_start = end;
            } else {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }

        if plain_start < text.len() {
            segments.push(Segment {
                text: &text[plain_start..],
                definition: None,
            });
        }
        segments
    }

    /// Longest term starting at byte `pos` on a word boundary, as
    /// `(end, definition)`.
    fn match_at(&self, text: &str, pos: usize) -> Option<(usize, &str)> {
        if !is_boundary(text, pos) {
            return None;
        }
        let rest = &text[pos..];
        self.by_length.iter().find_map(|term| {
            let len = prefix_len_ignore_case(rest, term)?;
            let end = pos + len;
            if !is_boundary(text, end) {
                return None;
            }
            self.terms.get(term).map(|d| (end, d.as_str()))
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word boundary in the regex sense: word-ness differs on either side.
fn is_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = text[pos..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Byte length of the prefix of `haystack` equal to `term` ignoring case.
fn prefix_len_ignore_case(haystack: &str, term: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for tc in term.chars() {
        let (_, hc) = hay.next()?;
        if !hc.to_lowercase().eq(tc.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}
