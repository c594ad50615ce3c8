//! Dashboard aggregates: star rankings and frequency tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::category::category_label;
use crate::record::{CanonicalRecord, RecordType};

/// Up to `n` records with at least one star, most-starred first.
///
/// Ties keep catalog order.
pub fn top_by_stars(catalog: &Catalog, n: usize) -> Vec<&CanonicalRecord> {
    let mut starred: Vec<&CanonicalRecord> = catalog.iter().filter(|r| r.stars() > 0).collect();
    starred.sort_by(|a, b| b.stars().cmp(&a.stars()));
    starred.truncate(n);
    starred
}

/// Label → count table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Entries by count descending, then label ascending.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries = self.sorted();
        entries.truncate(n);
        entries
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count the non-empty values `extractor` returns across the catalog.
pub fn frequency_table<F>(catalog: &Catalog, extractor: F) -> FrequencyTable
where
    F: Fn(&CanonicalRecord) -> Option<&str>,
{
    let mut counts = BTreeMap::new();
    for value in catalog.iter().filter_map(|r| extractor(r)) {
        if value.is_empty() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    FrequencyTable { counts }
}

/// One row of the category distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Raw slug; use this as the filter value.
    pub slug: String,
    /// Human-readable label.
    pub label: String,
    pub count: usize,
}

/// Category distribution, grouped by slug, most common first.
pub fn category_distribution(catalog: &Catalog) -> Vec<CategoryCount> {
    frequency_table(catalog, |r| r.category.as_deref())
        .sorted()
        .into_iter()
        .map(|(slug, count)| CategoryCount {
            slug: slug.to_string(),
            label: category_label(slug),
            count,
        })
        .collect()
}

/// GitHub primary-language distribution.
pub fn language_distribution(catalog: &Catalog) -> FrequencyTable {
    frequency_table(catalog, |r| r.language())
}

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub clients: usize,
    pub servers: usize,
    /// Records with a GitHub sub-record.
    pub with_github: usize,
    pub total_stars: u64,
    /// Distinct GitHub primary languages.
    pub languages: usize,
}

pub fn summarize(catalog: &Catalog) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total: catalog.len(),
        ..Default::default()
    };
    let mut languages = BTreeSet::new();
    for record in catalog {
        match record.record_type {
            RecordType::Client => summary.clients += 1,
            RecordType::Server => summary.servers += 1,
        }
        if record.github.is_some() {
            summary.with_github += 1;
        }
        summary.total_stars += record.stars();
        if let Some(lang) = record.language().filter(|l| !l.is_empty()) {
            languages.insert(lang);
        }
    }
    summary.languages = languages.len();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{GithubStats, RawRecord};

    fn repo(name: &str, stars: i64, lang: Option<&str>, category: Option<&str>) -> RawRecord {
        RawRecord {
            name: Some(name.into()),
            author_name: "someone".into(),
            category: category.map(str::to_string),
            github: Some(GithubStats {
                full_name: format!("acme/{name}"),
                stargazers_count: Some(stars),
                language: lang.map(str::to_string),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn plain(name: &str, category: Option<&str>) -> RawRecord {
        RawRecord {
            name: Some(name.into()),
            author_name: "someone".into(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::build(
            vec![
                plain("desktop app", Some("ai-chatbot")),
                repo("alpha", 10, Some("Rust"), Some("developer-tools")),
            ],
            vec![
                repo("beta", 50, Some("Python"), Some("developer-tools")),
                repo("gamma", 10, Some("Rust"), Some("databases")),
                repo("delta", 0, Some(""), None),
                plain("hosted", Some("")),
            ],
        )
    }

    #[test]
    fn top_by_stars_is_stable_and_skips_zero() {
        let catalog = catalog();
        let top: Vec<_> = top_by_stars(&catalog, 10)
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(top, vec!["beta", "alpha", "gamma"]);

        let top1 = top_by_stars(&catalog, 1);
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].display_name, "beta");
        assert!(top_by_stars(&catalog, 0).is_empty());
    }

    #[test]
    fn language_table_skips_empty_values() {
        let table = language_distribution(&catalog());
        assert_eq!(table.get("Rust"), 2);
        assert_eq!(table.get("Python"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.sorted(), vec![("Rust", 2), ("Python", 1)]);
    }

    #[test]
    fn category_distribution_keeps_slug_and_label() {
        let dist = category_distribution(&catalog());
        assert_eq!(
            dist[0],
            CategoryCount {
                slug: "developer-tools".into(),
                label: "Developer Tools".into(),
                count: 2,
            }
        );
        let labels: Vec<_> = dist.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Developer Tools", "AI Chatbot", "Databases"]);
    }

    #[test]
    fn frequency_table_accepts_any_extractor() {
        let catalog = catalog();
        let by_type = frequency_table(&catalog, |r| Some(r.record_type.as_str()));
        assert_eq!(by_type.get("client"), 2);
        assert_eq!(by_type.get("server"), 4);
        assert_eq!(by_type.total(), catalog.len());
        assert_eq!(by_type.top(1), vec![("server", 4)]);
    }

    #[test]
    fn summary_counts_everything() {
        let summary = summarize(&catalog());
        assert_eq!(
            summary,
            DashboardSummary {
                total: 6,
                clients: 2,
                servers: 4,
                with_github: 4,
                total_stars: 70,
                languages: 2,
            }
        );
    }
}
