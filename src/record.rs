//! Record types for the MCP client/server catalog.
//!
//! A [`RawRecord`] is one entry of a source document as ingested. Source
//! data is third-party and noisy, so every field decodes leniently: a value
//! of the wrong JSON type becomes "absent" instead of failing the document.
//! A [`CanonicalRecord`] is a raw record that survived catalog building,
//! tagged with its [`RecordType`], a display name and a [`RecordId`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which source document a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Client,
    Server,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" | "clients" => Ok(Self::Client),
            "server" | "servers" => Ok(Self::Server),
            other => Err(format!("unknown record type \"{other}\" (expected client or server)")),
        }
    }
}

/// Stable identifier of a record within one catalog.
///
/// Ids are assigned sequentially in final catalog order, so an id is also
/// the record's position and lookup is a direct index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u32);

impl RecordId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// GitHub repository statistics attached to a record by the crawler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubStats {
    /// `owner/repo`. Empty when the source omitted it.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub full_name: String,
    /// Signed so that negative values survive decoding and can be rejected
    /// by the merge-eligibility rule. `None` for missing or non-integers.
    #[serde(default, deserialize_with = "lenient::signed")]
    pub stargazers_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub forks_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub open_issues_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub contributors_count: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub language: Option<String>,
    /// Per-language byte counts.
    #[serde(default, deserialize_with = "lenient::languages", skip_serializing_if = "BTreeMap::is_empty")]
    pub languages: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub archived: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_docker: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_readme: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_requirements: bool,
    /// ISO-8601 timestamp of the last commit.
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_commit: Option<String>,
}

impl GithubStats {
    /// Star count clamped to zero for display and ranking.
    pub fn stars(&self) -> u64 {
        self.stargazers_count
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0)
    }
}

/// A metadata record as it appears in a source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    /// Treated as empty when absent.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub author_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    /// Slug form, e.g. `developer-tools`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    /// Comma-separated.
    #[serde(default, deserialize_with = "lenient::string")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub sse_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub server_command: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub server_config: Option<String>,
    #[serde(default, deserialize_with = "lenient::github")]
    pub github: Option<GithubStats>,
}

impl RawRecord {
    /// The description, or `""` when absent.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// The tag string, or `""` when absent.
    pub fn tags_or_empty(&self) -> &str {
        self.tags.as_deref().unwrap_or("")
    }

    /// Individual tags, trimmed, with empty entries removed.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags_or_empty()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Primary language reported by GitHub, if any.
    pub fn language(&self) -> Option<&str> {
        self.github.as_ref().and_then(|g| g.language.as_deref())
    }

    /// Star count, zero without GitHub identity.
    pub fn stars(&self) -> u64 {
        self.github.as_ref().map(GithubStats::stars).unwrap_or(0)
    }
}

/// A record that survived catalog building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: RecordId,
    /// Never empty.
    pub display_name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(flatten)]
    pub record: RawRecord,
}

impl std::ops::Deref for CanonicalRecord {
    type Target = RawRecord;

    fn deref(&self) -> &RawRecord {
        &self.record
    }
}

/// Decode a JSON document (already parsed) into raw records.
///
/// Non-object elements are dropped. Returns the decoded records and the
/// number of dropped elements.
pub fn decode_records(items: Vec<Value>) -> (Vec<RawRecord>, usize) {
    let mut dropped = 0;
    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::debug!(index, "dropping non-object element");
                dropped += 1;
                return None;
            }
            match serde_json::from_value::<RawRecord>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(index, error = %e, "dropping undecodable element");
                    dropped += 1;
                    None
                }
            }
        })
        .collect();
    (records, dropped)
}

/// Field decoders that never fail on a type mismatch.
mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::GithubStats;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        string(d).map(Option::unwrap_or_default)
    }

    pub fn signed<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(Value::deserialize(d)?.as_i64())
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(Value::deserialize(d)?.as_u64().unwrap_or(0))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(Value::deserialize(d)?.as_bool().unwrap_or(false))
    }

    pub fn languages<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, u64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(lang, bytes)| bytes.as_u64().map(|b| (lang, b)))
                .collect(),
            _ => BTreeMap::new(),
        })
    }

    pub fn github<'de, D: Deserializer<'de>>(d: D) -> Result<Option<GithubStats>, D::Error> {
        match Value::deserialize(d)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_record() {
        let record: RawRecord = serde_json::from_value(json!({
            "name": "Sequential Thinking",
            "author_name": "modelcontextprotocol",
            "description": "Dynamic problem solving",
            "category": "developer-tools",
            "tags": "thinking, planning",
            "url": "https://mcp.so/server/sequential-thinking",
            "type": "whatever-the-source-says",
            "github": {
                "full_name": "modelcontextprotocol/servers",
                "stargazers_count": 42,
                "forks_count": 7,
                "open_issues_count": 3,
                "contributors_count": 12,
                "language": "TypeScript",
                "languages": {"TypeScript": 1200, "JavaScript": 40},
                "license": "MIT License",
                "archived": false,
                "last_commit": "2025-03-01T10:00:00Z"
            }
        }))
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Sequential Thinking"));
        assert_eq!(record.tag_list(), vec!["thinking", "planning"]);
        let gh = record.github.as_ref().unwrap();
        assert_eq!(gh.stargazers_count, Some(42));
        assert_eq!(gh.languages.len(), 2);
        assert_eq!(record.language(), Some("TypeScript"));
        assert_eq!(record.stars(), 42);
    }

    #[test]
    fn wrong_types_decode_as_absent() {
        let record: RawRecord = serde_json::from_value(json!({
            "name": 12345,
            "description": null,
            "tags": ["not", "a", "string"],
            "github": {
                "full_name": "o/r",
                "stargazers_count": "many",
                "forks_count": -3
            }
        }))
        .unwrap();

        assert_eq!(record.name, None);
        assert_eq!(record.author_name, "");
        assert_eq!(record.description_or_empty(), "");
        assert!(record.tag_list().is_empty());
        let gh = record.github.unwrap();
        assert_eq!(gh.stargazers_count, None);
        assert_eq!(gh.forks_count, 0);
    }

    #[test]
    fn negative_stars_are_kept_signed() {
        let record: RawRecord = serde_json::from_value(json!({
            "name": "neg",
            "github": {"full_name": "o/neg", "stargazers_count": -1}
        }))
        .unwrap();
        let gh = record.github.as_ref().unwrap();
        assert_eq!(gh.stargazers_count, Some(-1));
        assert_eq!(record.stars(), 0);
    }

    #[test]
    fn non_object_github_is_absent() {
        let record: RawRecord =
            serde_json::from_value(json!({"name": "x", "github": "o/x"})).unwrap();
        assert!(record.github.is_none());
    }

    #[test]
    fn decode_records_drops_non_objects() {
        let (records, dropped) = decode_records(vec![
            json!({"name": "ok"}),
            json!("stray string"),
            json!(17),
            json!({"name": "also ok"}),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn record_type_parses_and_displays() {
        assert_eq!("Server".parse::<RecordType>().unwrap(), RecordType::Server);
        assert_eq!("clients".parse::<RecordType>().unwrap(), RecordType::Client);
        assert!("plugin".parse::<RecordType>().is_err());
        assert_eq!(RecordType::Client.to_string(), "client");
    }

    #[test]
    fn canonical_record_serializes_flat() {
        let canonical = CanonicalRecord {
            id: RecordId::new(3),
            display_name: "repo".into(),
            record_type: RecordType::Server,
            record: RawRecord {
                name: Some("Repo".into()),
                author_name: "someone".into(),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&canonical).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["type"], "server");
        assert_eq!(value["display_name"], "repo");
        assert_eq!(value["author_name"], "someone");
        assert_eq!(canonical.author_name, "someone");
    }
}
