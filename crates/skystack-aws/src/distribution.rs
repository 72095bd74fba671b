//! Content-delivery distribution manager

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, Resource, StackProps, Synth};

const RESOURCE: &str = "distribution";

/// Configuration entry for one distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionProps {
    pub id: String,

    /// Origin hostname (e.g. a bucket website endpoint)
    #[serde(default)]
    pub origin: Option<String>,

    /// Logical alias sub-domains; each becomes `<sub>-<stage>.<domainName>`
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub certificate_arn: Option<String>,

    #[serde(default)]
    pub default_root_object: Option<String>,
}

/// Handle to a created distribution
#[derive(Debug, Clone)]
pub struct Distribution {
    pub scoped_id: String,
    pub aliases: Vec<String>,
    pub distribution_id: String,
    pub distribution_domain_name: String,
}

/// Manager for content-delivery distributions
pub struct DistributionManager {
    props: StackProps,
}

impl DistributionManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(
        &self,
        id: &str,
        synth: &mut Synth,
        distribution: &DistributionProps,
    ) -> Result<Distribution> {
        let origin = distribution.origin.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "origin is required")
        })?;

        let aliases = self.resolve_aliases(id, distribution)?;

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "origin": origin,
                "aliases": aliases,
                "certificateArn": distribution.certificate_arn,
                "defaultRootObject": distribution
                    .default_root_object
                    .as_deref()
                    .unwrap_or("index.html"),
            }),
        );
        synth.add_resource(id, resource)?;

        let distribution_id = Synth::attr_ref(id, "distributionId");
        let distribution_domain_name = Synth::attr_ref(id, "domainName");
        synth.add_output(id, "distributionId", distribution_id.clone())?;
        synth.add_output(id, "distributionDomainName", distribution_domain_name.clone())?;

        tracing::info!(scoped_id = id, origin = %origin, "Created distribution");
        Ok(Distribution {
            scoped_id: id.to_string(),
            aliases,
            distribution_id,
            distribution_domain_name,
        })
    }

    /// Stage-scoped alias hostnames; aliases require a stack domain
    fn resolve_aliases(&self, id: &str, distribution: &DistributionProps) -> Result<Vec<String>> {
        let subs: Vec<&str> = if distribution.aliases.is_empty() {
            self.props.sub_domain.as_deref().into_iter().collect()
        } else {
            distribution.aliases.iter().map(String::as_str).collect()
        };

        if subs.is_empty() {
            return Ok(vec![]);
        }

        let domain = self.props.domain_name.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "aliases need a domainName on the stack")
        })?;

        Ok(subs
            .iter()
            .map(|sub| stage_domain(sub, &self.props.stage, domain))
            .collect())
    }
}
