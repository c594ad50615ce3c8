//! Loading the client and server source documents.
//!
//! Each source is a local file or an `http(s)://` URL holding a JSON array
//! of raw records. Both documents are retrieved concurrently and the load
//! fails as a whole if either one fails.

use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;

use crate::catalog::Catalog;
use crate::error::{LoadError, LoadResult};
use crate::record::{decode_records, RawRecord};

/// Where a source document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret `s` as a URL when it has an http(s) scheme, else as a path.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl From<&str> for DataSource {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Both source documents, decoded.
#[derive(Debug, Clone, Default)]
pub struct RawDatasets {
    pub clients: Vec<RawRecord>,
    pub servers: Vec<RawRecord>,
}

impl RawDatasets {
    pub fn into_catalog(self) -> Catalog {
        Catalog::build(self.clients, self.servers)
    }
}

/// Retrieve and decode one source document.
pub fn load_document(source: &DataSource) -> LoadResult<Vec<RawRecord>> {
    tracing::info!(%source, "loading source document");
    let bytes = match source {
        DataSource::File(path) => std::fs::read(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            source: e,
        })?,
        DataSource::Url(url) => fetch(url)?,
    };
    let records = parse_document(&bytes, &source.to_string())?;
    tracing::info!(%source, records = records.len(), "source document loaded");
    Ok(records)
}

/// Parse a JSON array of raw records. Non-object elements are dropped.
pub fn parse_document(bytes: &[u8], origin: &str) -> LoadResult<Vec<RawRecord>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LoadError::NotAnArray {
                origin: origin.to_string(),
                found: json_kind(&other),
            });
        }
    };
    let (records, dropped) = decode_records(items);
    if dropped > 0 {
        tracing::warn!(origin, dropped, "skipped elements that are not records");
    }
    Ok(records)
}

/// Retrieve both documents concurrently.
///
/// Fails if either retrieval fails; the client error wins when both do.
pub fn load_datasets(clients: &DataSource, servers: &DataSource) -> LoadResult<RawDatasets> {
    let (clients, servers) = rayon::join(|| load_document(clients), || load_document(servers));
    Ok(RawDatasets {
        clients: clients?,
        servers: servers?,
    })
}

/// Retrieve both documents and build the catalog.
pub fn load_catalog(clients: &DataSource, servers: &DataSource) -> LoadResult<Catalog> {
    load_datasets(clients, servers).map(RawDatasets::into_catalog)
}

fn fetch(url: &str) -> LoadResult<Vec<u8>> {
    let response = ureq::get(url).call().map_err(|e| LoadError::Fetch {
        url: url.into(),
        message: e.to_string(),
    })?;

    let mut data = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut data)
        .map_err(|e| LoadError::Fetch {
            url: url.into(),
            message: format!("read body: {e}"),
        })?;
    Ok(data)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
