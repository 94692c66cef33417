//! The `techquiz glossary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use techquiz_providers::config::load_glossary;

pub fn execute(glossary_path: Option<PathBuf>) -> Result<()> {
    let glossary = load_glossary(glossary_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Term", "Definition"]);
    for (term, definition) in glossary.entries() {
        table.add_row(vec![Cell::new(term), Cell::new(definition)]);
    }

    println!("{table}");
    println!("{} terms", glossary.len());
    Ok(())
}
