//! Cute Framework documentation index and MCP server.
//!
//! Headers and topic guides are parsed into [`DocRecord`]s, stored in a
//! [`DocIndex`], and queried through the tools in [`tools`], which the
//! [`server`] exposes over MCP stdio.

pub mod builder;
pub mod cli;
pub mod download;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod worker;

pub use builder::{IndexBuilder, SourceOptions};
pub use error::{Result, ToolError};
pub use model::{DocRecord, RecordDetails, RecordKind};
pub use search::{DocIndex, IndexStats, SearchQuery};
pub use worker::DocState;
