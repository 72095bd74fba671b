//! Certificate manager
//!
//! DNS-validated certificates for stage-scoped hostnames. An entry that
//! carries an existing ARN is passed through without emitting a resource.

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, Resource, StackProps, Synth};

const RESOURCE: &str = "certificate";

/// Configuration entry for one certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateProps {
    pub id: String,

    /// Existing certificate ARN; creation is skipped when set
    #[serde(default)]
    pub certificate_arn: Option<String>,

    /// Hostname to issue for; defaults to `<subDomain>-<stage>.<domainName>`
    #[serde(default)]
    pub domain_name: Option<String>,

    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
}

/// Handle to a created or resolved certificate
#[derive(Debug, Clone)]
pub struct Certificate {
    pub scoped_id: String,
    pub domain_name: Option<String>,
    pub certificate_arn: String,
}

/// Manager for TLS certificates
pub struct CertificateManager {
    props: StackProps,
}

impl CertificateManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(
        &self,
        id: &str,
        synth: &mut Synth,
        certificate: &CertificateProps,
    ) -> Result<Certificate> {
        // Existing certificate: register the output, emit nothing
        if let Some(arn) = &certificate.certificate_arn {
            tracing::debug!(scoped_id = id, "Using existing certificate");
            synth.add_output(id, "certificateArn", arn.clone())?;
            return Ok(Certificate {
                scoped_id: id.to_string(),
                domain_name: certificate.domain_name.clone(),
                certificate_arn: arn.clone(),
            });
        }

        let domain_name = self.resolve_domain(id, certificate)?;

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "domainName": domain_name,
                "subjectAlternativeNames": certificate.subject_alternative_names,
                "validation": "dns",
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;

        let arn = Synth::attr_ref(id, "certificateArn");
        synth.add_output(id, "certificateArn", arn.clone())?;

        tracing::info!(scoped_id = id, domain = %domain_name, "Created certificate");
        Ok(Certificate {
            scoped_id: id.to_string(),
            domain_name: Some(domain_name),
            certificate_arn: arn,
        })
    }

    fn resolve_domain(&self, id: &str, certificate: &CertificateProps) -> Result<String> {
        if let Some(domain) = &certificate.domain_name {
            return Ok(domain.clone());
        }

        match (&self.props.sub_domain, &self.props.domain_name) {
            (Some(sub), Some(domain)) => Ok(stage_domain(sub, &self.props.stage, domain)),
            _ => Err(AwsError::invalid_props(
                RESOURCE,
                id,
                "either certificateArn or domainName is required",
            )),
        }
    }
}
