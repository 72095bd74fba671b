//! Zone DNS record manager

use crate::error::{EdgeError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, Resource, StackProps, Synth};

const RESOURCE: &str = "dns-record";

// TTL 1 means "automatic" on the Cloudflare API
const AUTO_TTL: u32 = 1;

/// Configuration entry for one zone record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecordProps {
    pub id: String,

    /// Record type; defaults to CNAME
    #[serde(default)]
    pub record_type: Option<String>,

    /// Sub-domain; defaults to the stack's subDomain, then the scoped id
    #[serde(default)]
    pub sub_domain: Option<String>,

    /// Record content (hostname or address)
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub ttl: Option<u32>,

    /// Route the record through the edge proxy
    #[serde(default)]
    pub proxied: bool,
}

/// Handle to a created zone record
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub scoped_id: String,
    pub record_name: String,
    pub record_type: String,
    pub proxied: bool,
}

/// Manager for zone DNS records
pub struct DnsRecordManager {
    props: StackProps,
}

impl DnsRecordManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(&self, id: &str, synth: &mut Synth, record: &EdgeRecordProps) -> Result<EdgeRecord> {
        let content = record.content.as_deref().ok_or_else(|| {
            EdgeError::invalid_props(RESOURCE, id, "content is required")
        })?;
        let domain = self.props.domain_name.as_deref().ok_or_else(|| {
            EdgeError::invalid_props(RESOURCE, id, "stack has no domainName configured")
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
                "name": record_name,
                "type": record_type,
                "content": content,
                "ttl": record.ttl.unwrap_or(AUTO_TTL),
                "proxied": record.proxied,
                "zone": domain,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "recordName", record_name.clone())?;

        tracing::info!(scoped_id = id, record = %record_name, "Created zone record");
        Ok(EdgeRecord {
            scoped_id: id.to_string(),
            record_name,
            record_type,
            proxied: record.proxied,
        })
    }
}
