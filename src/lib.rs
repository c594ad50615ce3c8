// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # mcp-explorer
//!
//! Search and exploration over the MCP client and server directories.
//!
//! ## Architecture
//!
//! - **Records** (`record`): lenient decoding of the crawler's JSON output
//! - **Catalog** (`catalog`): merges both sources, deduplicating by GitHub repository
//! - **Query** (`query`): text search, filters and pagination, all pure functions
//! - **Aggregates** (`aggregate`): star rankings, category/language distributions
//! - **Explorer** (`explorer`): the stateful browsing session (filters, page, debounced input)
//! - **Loader** (`loader`): fetches both source documents concurrently, all-or-nothing
//!
//! ## Library usage
//!
//! ```no_run
//! use mcp_explorer::loader::{load_catalog, DataSource};
//! use mcp_explorer::query::{search, FilterSpec};
//!
//! let catalog = load_catalog(
//!     &DataSource::parse("mcpso_clients_cleaned.json"),
//!     &DataSource::parse("mcpso_servers_cleaned.json"),
//! )
//! .unwrap();
//! let spec = FilterSpec { query: "postgres".into(), ..Default::default() };
//! let page = search(&catalog, &spec, 1, 20);
//! println!("{} matches", page.total_count);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod category;
pub mod config;
pub mod debounce;
pub mod error;
pub mod explorer;
pub mod loader;
pub mod names;
pub mod paths;
pub mod query;
pub mod record;

pub use catalog::Catalog;
pub use error::{ExplorerError, ExplorerResult};
pub use explorer::Explorer;
pub use query::{FilterSpec, ResultPage};
pub use record::{CanonicalRecord, RawRecord, RecordId, RecordType};
