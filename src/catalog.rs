//! Canonical catalog of MCP clients and servers.
//!
//! The catalog merges the client and server source documents into a single
//! ordered list. Records that point at the same GitHub repository (compared
//! case-insensitively on `full_name`) collapse into one: the record with
//! more stars wins, then the one with the longer description, then the one
//! seen first. Records without GitHub identity pass through untouched unless
//! their name is a placeholder.
//!
//! Final order: pass-through records in input order, then merged GitHub
//! records in the order their repository was first seen. Ids are assigned
//! in that order and never change for the life of the catalog.

use std::collections::HashMap;

use crate::names::{display_name_from_full_name, is_valid_name};
use crate::record::{CanonicalRecord, RawRecord, RecordId, RecordType};

/// Counters describing one catalog build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BuildStats {
    /// Records across both inputs.
    pub input: usize,
    /// Records without GitHub identity that were kept.
    pub passed_through: usize,
    /// Records without GitHub identity dropped for a placeholder name.
    pub dropped: usize,
    /// Distinct GitHub repositories.
    pub repositories: usize,
    /// GitHub records folded into another record of the same repository.
    pub merged: usize,
}

/// Immutable, deduplicated collection of records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CanonicalRecord>,
    stats: BuildStats,
}

impl Catalog {
    /// Build a catalog from the two source documents.
    ///
    /// Never fails: malformed entries are dropped or merged.
    pub fn build(clients: Vec<RawRecord>, servers: Vec<RawRecord>) -> Self {
        let tagged = clients
            .into_iter()
            .map(|r| (RecordType::Client, r))
            .chain(servers.into_iter().map(|r| (RecordType::Server, r)));

        let mut stats = BuildStats::default();
        let mut pass_through: Vec<(RecordType, RawRecord, String)> = Vec::new();
        let mut groups: Vec<(RecordType, RawRecord)> = Vec::new();
        let mut group_by_key: HashMap<String, usize> = HashMap::new();

        for (record_type, record) in tagged {
            stats.input += 1;
            match identity_key(&record) {
                Some(key) => match group_by_key.get(&key) {
                    Some(&slot) => {
                        stats.merged += 1;
                        if outranks(&record, &groups[slot].1) {
                            groups[slot] = (record_type, record);
                        }
                    }
                    None => {
                        group_by_key.insert(key, groups.len());
                        groups.push((record_type, record));
                    }
                },
                None => {
                    if is_valid_name(record.name.as_deref()) {
                        let display_name = record.name.clone().unwrap_or_default();
                        pass_through.push((record_type, record, display_name));
                    } else {
                        tracing::debug!(
                            name = ?record.name,
                            %record_type,
                            "dropping record with placeholder name"
                        );
                        stats.dropped += 1;
                    }
                }
            }
        }

        stats.passed_through = pass_through.len();
        stats.repositories = groups.len();

        let github_records = groups.into_iter().map(|(record_type, record)| {
            let display_name = display_name_from_full_name(
                record.github.as_ref().map(|g| g.full_name.as_str()),
            );
            (record_type, record, display_name)
        });

        let records: Vec<CanonicalRecord> = pass_through
            .into_iter()
            .chain(github_records)
            .enumerate()
            .map(|(index, (record_type, record, display_name))| CanonicalRecord {
                id: RecordId::new(index as u32),
                display_name,
                record_type,
                record,
            })
            .collect();

        tracing::info!(
            input = stats.input,
            passed_through = stats.passed_through,
            dropped = stats.dropped,
            repositories = stats.repositories,
            merged = stats.merged,
            total = records.len(),
            "catalog built"
        );

        Self { records, stats }
    }

    /// Look up a record by id. O(1): ids are positions.
    pub fn get(&self, id: RecordId) -> Option<&CanonicalRecord> {
        self.records.get(id.index())
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Iterate records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    /// Counters from the build that produced this catalog.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Lower-cased `full_name` for records eligible for GitHub-keyed merging:
/// a non-empty full name and a non-negative integer star count.
fn identity_key(record: &RawRecord) -> Option<String> {
    let github = record.github.as_ref()?;
    if github.full_name.is_empty() {
        return None;
    }
    match github.stargazers_count {
        Some(stars) if stars >= 0 => Some(github.full_name.to_lowercase()),
        _ => None,
    }
}

/// Whether `challenger` replaces `kept` within a repository group.
fn outranks(challenger: &RawRecord, kept: &RawRecord) -> bool {
    let stars = |r: &RawRecord| r.github.as_ref().and_then(|g| g.stargazers_count);
    match stars(challenger).cmp(&stars(kept)) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            challenger.description_or_empty().chars().count()
                > kept.description_or_empty().chars().count()
        }
    }
}
