//! `fields` command

use colored::*;

use crate::import::fields::KNOWN_FIELDS;

pub fn handle_fields_command() {
    let width = KNOWN_FIELDS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    for (name, label) in KNOWN_FIELDS {
        println!("  {}  {}", format!("{:width$}", name, width = width).cyan(), label);
    }
}
