//! Cloudflare resource managers for skystack
//!
//! Edge-side counterparts to the AWS managers: zone DNS records and worker
//! scripts, following the same scoped-id / synthesis-scope / typed-props
//! calling convention.

pub mod dns;
pub mod error;
pub mod worker;

// Re-exports
pub use dns::{DnsRecordManager, EdgeRecord, EdgeRecordProps};
pub use error::{EdgeError, Result};
pub use worker::{Worker, WorkerManager, WorkerProps};

pub(crate) const PROVIDER: &str = "cloudflare";
