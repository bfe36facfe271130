//! Package-repository registrations as reported by the polled CLI tool.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::errors::ParseError;

/// One repository registration, e.g. `{"name": "bitnami", "url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Registration name, unique within one listing
    pub name: String,
    /// Repository URL
    pub url: String,
}

impl RepositoryEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Parse the tool's JSON array payload.
///
/// Empty output, malformed JSON, an empty array and duplicate names are all
/// failures: the caller treats them as "not converged yet".
pub fn parse_entries(payload: &str) -> Result<Vec<RepositoryEntry>, ParseError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyOutput);
    }

    let entries: Vec<RepositoryEntry> = serde_json::from_str(trimmed)?;
    if entries.is_empty() {
        return Err(ParseError::NoEntries);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(ParseError::DuplicateName(entry.name.clone()));
        }
    }

    Ok(entries)
}

/// Key entries by name.
///
/// Listing order is not guaranteed by the tool, so comparisons should go
/// through this map rather than the raw sequence.
pub fn entries_by_name(entries: &[RepositoryEntry]) -> BTreeMap<&str, &str> {
    entries
        .iter()
        .map(|e| (e.name.as_str(), e.url.as_str()))
        .collect()
}
