//! AWS resource managers for skystack
//!
//! One manager per resource domain. Every manager method follows the same
//! contract: take a scoped id, the synthesis scope, and a typed properties
//! struct; validate; emit resource definitions with stage-suffixed physical
//! names; register `<scoped_id>-<attribute>` outputs; return a typed handle.

pub mod certificate;
pub mod distribution;
pub mod dns;
pub mod error;
pub mod function;
pub mod monitoring;
pub mod parameter;
pub mod storage;
pub mod topic;

// Re-exports
pub use certificate::{Certificate, CertificateManager, CertificateProps};
pub use distribution::{Distribution, DistributionManager, DistributionProps};
pub use dns::{DnsManager, DnsRecord, RecordProps};
pub use error::{AwsError, Result};
pub use function::{Function, FunctionManager, FunctionProps};
pub use monitoring::{Alarm, AlarmProps, Dashboard, DashboardProps, MonitoringManager};
pub use parameter::{Parameter, ParameterManager, ParameterProps};
pub use storage::{Bucket, BucketProps, StorageManager};
pub use topic::{Topic, TopicManager, TopicProps};

pub(crate) const PROVIDER: &str = "aws";
