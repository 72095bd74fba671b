//! Stack properties derived from the merged context

use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};
use skystack_config::Context;

/// Properties handed to the root construct
///
/// Only the generic keys are copied out of the merged context.
/// Resource-specific arrays stay in the context and are resolved by the
/// individual managers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackProps {
    /// Stack name
    pub name: String,

    /// Target region
    pub region: String,

    /// Deployment stage (dev, test, uat, prod, ...)
    pub stage: String,

    /// Apex domain for stage-scoped hostnames
    pub domain_name: Option<String>,

    /// Default sub-domain prefix
    pub sub_domain: Option<String>,
}

impl StackProps {
    /// Copy the fixed key set out of the merged context
    pub fn from_context(context: &Context) -> Result<Self> {
        Ok(Self {
            name: require(context, "name")?,
            region: require(context, "region")?,
            stage: require(context, "stage")?,
            domain_name: context.get_str("domainName").map(str::to_string),
            sub_domain: context.get_str("subDomain").map(str::to_string),
        })
    }
}

fn require(context: &Context, key: &str) -> Result<String> {
    context
        .get_str(key)
        .map(str::to_string)
        .ok_or_else(|| SynthError::MissingContext(key.to_string()))
}
