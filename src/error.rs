//! Rich diagnostic error types for mcp-explorer.
//!
//! Only loading and configuration can fail. Catalog building, filtering,
//! pagination and aggregation are total: malformed records are dropped or
//! merged, and out-of-range pages are clamped.

use miette::Diagnostic;
use thiserror::Error;

use crate::record::RecordId;

/// Top-level error type.
#[derive(Debug, Error, Diagnostic)]
pub enum ExplorerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error("record not found: {id}")]
    #[diagnostic(
        code(mcp::catalog::not_found),
        help(
            "Record ids are positions in the current catalog and change when the \
             source data changes. Run `mcp-explorer search` to list current ids."
        )
    )]
    RecordNotFound { id: RecordId },
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Failure to retrieve or parse one of the source documents.
///
/// Any of these aborts the whole load; no catalog is built from one source.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read {path}")]
    #[diagnostic(
        code(mcp::load::read),
        help("Check that the file exists and is readable, or pass --clients/--servers.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    #[diagnostic(
        code(mcp::load::fetch),
        help("Check that the URL is reachable and the network is available.")
    )]
    Fetch { url: String, message: String },

    #[error("invalid JSON in {origin}: {message}")]
    #[diagnostic(
        code(mcp::load::parse),
        help("The document must be a JSON array of client or server records.")
    )]
    Parse { origin: String, message: String },

    #[error("expected a JSON array in {origin}, found {found}")]
    #[diagnostic(
        code(mcp::load::not_an_array),
        help("The document must be a JSON array of client or server records.")
    )]
    NotAnArray { origin: String, found: &'static str },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(mcp::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(mcp::config::parse),
        help("Check the TOML syntax. `mcp-explorer config show` prints a valid example.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(mcp::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Path errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(mcp::paths::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(mcp::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ExplorerResult<T> = std::result::Result<T, ExplorerError>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type PathResult<T> = std::result::Result<T, PathError>;
