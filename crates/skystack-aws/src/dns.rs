//! Hosted-zone record manager

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, Resource, StackProps, Synth};

const RESOURCE: &str = "dns-record";
const DEFAULT_TTL_SECS: u32 = 300;

/// Configuration entry for one record set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProps {
    pub id: String,

    /// Record type; defaults to CNAME
    #[serde(default)]
    pub record_type: Option<String>,

    /// Sub-domain; defaults to the stack's subDomain, then the scoped id
    #[serde(default)]
    pub sub_domain: Option<String>,

    /// Record target (hostname or address)
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Handle to a created record set
#[derive(Debug, Clone)]
pub struct DnsRecord {
    pub scoped_id: String,
    pub record_name: String,
    pub record_type: String,
}

/// Manager for hosted-zone records
pub struct DnsManager {
    props: StackProps,
}

impl DnsManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create_record(&self, id: &str, synth: &mut Synth, record: &RecordProps) -> Result<DnsRecord> {
        let target = record.target.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "target is required")
        })?;
        let domain = self.props.domain_name.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "stack has no domainName configured")
        })?;

        let sub = record
            .sub_domain
            .as_deref()
            .or(self.props.sub_domain.as_deref())
            .unwrap_or(id);
        let record_name = stage_domain(sub, &self.props.stage, domain);
        let record_type = record.record_type.clone().unwrap_or_else(|| "CNAME".to_string());

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "recordName": record_name,
                "recordType": record_type,
                "target": target,
                "ttl": record.ttl.unwrap_or(DEFAULT_TTL_SECS),
                "zone": domain,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "recordName", record_name.clone())?;

        tracing::info!(scoped_id = id, record = %record_name, "Created record set");
        Ok(DnsRecord {
            scoped_id: id.to_string(),
            record_name,
            record_type,
        })
    }
}
