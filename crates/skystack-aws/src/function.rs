//! Serverless function manager

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_name, Resource, StackProps, Synth};
use std::collections::BTreeMap;

const RESOURCE: &str = "function";
const DEFAULT_RUNTIME: &str = "nodejs20.x";
const DEFAULT_MEMORY_MB: u32 = 128;
const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Configuration entry for one function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionProps {
    pub id: String,

    /// Entry point, e.g. `index.handler`
    #[serde(default)]
    pub handler: Option<String>,

    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default)]
    pub memory_size: Option<u32>,

    #[serde(default)]
    pub timeout: Option<u32>,

    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// Handle to a created function
#[derive(Debug, Clone)]
pub struct Function {
    pub scoped_id: String,
    pub function_name: String,
    pub function_arn: String,
}

/// Manager for serverless functions
pub struct FunctionManager {
    props: StackProps,
}

impl FunctionManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(&self, id: &str, synth: &mut Synth, function: &FunctionProps) -> Result<Function> {
        let handler = function.handler.as_deref().ok_or_else(|| {
            AwsError::invalid_props(RESOURCE, id, "handler is required")
        })?;

        let function_name = stage_name(id, &self.props.stage);

        // Stage is always visible to the function itself
        let mut environment = function.environment.clone();
        environment.insert("STAGE".to_string(), self.props.stage.clone());

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "functionName": function_name,
                "runtime": function.runtime.as_deref().unwrap_or(DEFAULT_RUNTIME),
                "handler": handler,
                "memorySize": function.memory_size.unwrap_or(DEFAULT_MEMORY_MB),
                "timeout": function.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
                "environment": environment,
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;

        let arn = Synth::attr_ref(id, "functionArn");
        synth.add_output(id, "functionName", function_name.clone())?;
        synth.add_output(id, "functionArn", arn.clone())?;

        tracing::info!(scoped_id = id, function = %function_name, "Created function");
        Ok(Function {
            scoped_id: id.to_string(),
            function_name,
            function_arn: arn,
        })
    }
}
