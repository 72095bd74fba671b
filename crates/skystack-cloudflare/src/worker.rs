//! Worker script manager

use crate::error::{EdgeError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, stage_name, Resource, StackProps, Synth};
use std::collections::BTreeMap;

const RESOURCE: &str = "worker";

/// Configuration entry for one worker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProps {
    pub id: String,

    /// Script path relative to the project root
    #[serde(default)]
    pub script_path: Option<String>,

    /// Sub-domain the route is mounted on; defaults to the scoped id
    #[serde(default)]
    pub sub_domain: Option<String>,

    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// Handle to a created worker
#[derive(Debug, Clone)]
pub struct Worker {
    pub scoped_id: String,
    pub worker_name: String,
    pub route: String,
}

/// Manager for worker scripts
pub struct WorkerManager {
    props: StackProps,
}

impl WorkerManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(&self, id: &str, synth: &mut Synth, worker: &WorkerProps) -> Result<Worker> {
        let script_path = worker.script_path.as_deref().ok_or_else(|| {
            EdgeError::invalid_props(RESOURCE, id, "scriptPath is required")
        })?;
        let domain = self.props.domain_name.as_deref().ok_or_else(|| {
            EdgeError::invalid_props(RESOURCE, id, "stack has no domainName configured")
        })?;

        let worker_name = stage_name(id, &self.props.stage);
        let sub = worker.sub_domain.as_deref().unwrap_or(id);
        let route = format!("{}/*", stage_domain(sub, &self.props.stage, domain));

        // Stage is always visible to the worker itself
        let mut vars = worker.vars.clone();
        vars.insert("STAGE".to_string(), self.props.stage.clone());

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "name": worker_name,
                "scriptPath": script_path,
                "routes": [route],
                "vars": vars,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "workerName", worker_name.clone())?;
        synth.add_output(id, "workerRoute", route.clone())?;

        tracing::info!(scoped_id = id, worker = %worker_name, route = %route, "Created worker");
        Ok(Worker {
            scoped_id: id.to_string(),
            worker_name,
            route,
        })
    }
}
