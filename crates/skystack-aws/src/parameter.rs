//! Parameter store manager
//!
//! Parameters are namespaced by stage: `/{stage}/{name}`.

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{Resource, StackProps, Synth};

const RESOURCE: &str = "parameter";

/// Configuration entry for one parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterProps {
    pub id: String,

    /// Parameter name below the stage prefix; defaults to the scoped id
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// Handle to a created parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    pub scoped_id: String,
    pub parameter_name: String,
}

/// Manager for parameter store entries
pub struct ParameterManager {
    props: StackProps,
}

impl ParameterManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(&self, id: &str, synth: &mut Synth, parameter: &ParameterProps) -> Result<Parameter> {
        let value = parameter.value.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "value is required")
        })?;

        let name = parameter.name.as_deref().unwrap_or(id);
        let parameter_name = format!("/{}/{}", self.props.stage, name);

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "parameterName": parameter_name,
                "value": value,
                "type": if parameter.secure { "SecureString" } else { "String" },
                "description": parameter.description,
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "parameterName", parameter_name.clone())?;

        tracing::info!(scoped_id = id, parameter = %parameter_name, "Created parameter");
        Ok(Parameter {
            scoped_id: id.to_string(),
            parameter_name,
        })
    }
}
