//! Output formatting utilities for the CLI.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::domain::models::RepositoryEntry;

/// A command result that can be printed for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Human-readable rendering
    fn to_human(&self) -> String;

    /// JSON rendering, the serde form by default
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Render repository entries as a table, sorted by name.
pub fn repository_table(entries: &[RepositoryEntry]) -> String {
    let mut sorted: Vec<&RepositoryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
        ]);

    for entry in sorted {
        table.add_row(vec![Cell::new(&entry.name), Cell::new(&entry.url)]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_table_sorted() {
        let table = repository_table(&[
            RepositoryEntry::new("stable", "https://charts.helm.sh/stable"),
            RepositoryEntry::new("bitnami", "https://charts.bitnami.com/bitnami"),
        ]);

        let bitnami = table.find("bitnami").unwrap();
        let stable = table.find("stable").unwrap();
        assert!(bitnami < stable);
        assert!(table.contains("https://charts.helm.sh/stable"));
    }
}
