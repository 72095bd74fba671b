//! Root construct
//!
//! Instantiates every manager as a field and exposes them, together with
//! the stack properties and the merged context, to application constructs.

use skystack_aws::{
    CertificateManager, DistributionManager, DnsManager, FunctionManager, MonitoringManager,
    ParameterManager, StorageManager, TopicManager,
};
use skystack_cloudflare::{DnsRecordManager, WorkerManager};
use skystack_config::Context;
use skystack_core::StackProps;

/// Root of the construct tree
pub struct Construct {
    /// Derived stack properties
    pub props: StackProps,

    /// Final merged context; managers resolve their entries from here
    pub context: Context,

    // Cloud provider managers
    pub certificates: CertificateManager,
    pub storage: StorageManager,
    pub functions: FunctionManager,
    pub dns: DnsManager,
    pub topics: TopicManager,
    pub parameters: ParameterManager,
    pub monitoring: MonitoringManager,
    pub distributions: DistributionManager,

    // Edge provider managers
    pub edge_dns: DnsRecordManager,
    pub workers: WorkerManager,
}

impl Construct {
    pub fn new(props: StackProps, context: Context) -> Self {
        Self {
            certificates: CertificateManager::new(props.clone()),
            storage: StorageManager::new(props.clone()),
            functions: FunctionManager::new(props.clone()),
            dns: DnsManager::new(props.clone()),
            topics: TopicManager::new(props.clone()),
            parameters: ParameterManager::new(props.clone()),
            monitoring: MonitoringManager::new(props.clone()),
            distributions: DistributionManager::new(props.clone()),
            edge_dns: DnsRecordManager::new(props.clone()),
            workers: WorkerManager::new(props.clone()),
            props,
            context,
        }
    }
}
