//! Synthesis scope and template
//!
//! `Synth` is the shared scope handed to every manager call. It collects the
//! declarative resource definitions and named outputs of one stack and
//! serializes them into the `<stack>-<stage>.json` template consumed by
//! deploy tooling.

use crate::error::{Result, SynthError};
use crate::naming::output_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const TEMPLATE_VERSION: u32 = 1;

/// A declarative resource definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Provider name (e.g. "aws", "cloudflare")
    pub provider: String,

    /// Resource type (e.g. "certificate", "bucket")
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource-specific properties
    pub properties: serde_json::Value,
}

impl Resource {
    pub fn new(
        provider: impl Into<String>,
        resource_type: impl Into<String>,
        properties: serde_json::Value,
    ) -> Self {
        Self {
            provider: provider.into(),
            resource_type: resource_type.into(),
            properties,
        }
    }
}

/// The synthesis scope of a single stack
///
/// Scoped ids are unique within a stack; registering the same id twice is an
/// error rather than a silent overwrite. Maps are ordered so the written
/// template is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synth {
    /// Template format version
    pub version: u32,

    /// Stack name
    pub stack: String,

    /// Deployment stage
    pub stage: String,

    /// Synthesis timestamp
    pub synthesized_at: DateTime<Utc>,

    /// Resources indexed by scoped id
    pub resources: BTreeMap<String, Resource>,

    /// Output values indexed by `<scoped_id>-<attribute>`
    pub outputs: BTreeMap<String, String>,
}

impl Synth {
    pub fn new(stack: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            version: TEMPLATE_VERSION,
            stack: stack.into(),
            stage: stage.into(),
            synthesized_at: Utc::now(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Register a resource under a scoped id
    pub fn add_resource(&mut self, scoped_id: &str, resource: Resource) -> Result<()> {
        if self.resources.contains_key(scoped_id) {
            return Err(SynthError::DuplicateResource(scoped_id.to_string()));
        }

        tracing::debug!(
            scoped_id,
            provider = %resource.provider,
            resource_type = %resource.resource_type,
            "Registered resource"
        );
        self.resources.insert(scoped_id.to_string(), resource);
        Ok(())
    }

    /// Register an output value under `<scoped_id>-<attribute>`
    pub fn add_output(
        &mut self,
        scoped_id: &str,
        attribute: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let name = output_name(scoped_id, attribute);
        if self.outputs.contains_key(&name) {
            return Err(SynthError::DuplicateOutput(name));
        }

        self.outputs.insert(name, value.into());
        Ok(())
    }

    /// Placeholder token for an attribute only known at deploy time
    ///
    /// Deploy tooling resolves `{{ scoped_id.attribute }}` against the
    /// provider once the resource exists.
    pub fn attr_ref(scoped_id: &str, attribute: &str) -> String {
        format!("{{{{ {scoped_id}.{attribute} }}}}")
    }

    pub fn resource(&self, scoped_id: &str) -> Option<&Resource> {
        self.resources.get(scoped_id)
    }

    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs.get(name).map(String::as_str)
    }

    /// Serialize the template as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the template to `<dir>/<stack>-<stage>.json`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| SynthError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let path = dir.join(format!("{}-{}.json", self.stack, self.stage));
        let content = self.to_json()?;
        std::fs::write(&path, content).map_err(|e| SynthError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(file = %path.display(), resources = self.resources.len(), "Wrote template");
        Ok(path)
    }
}
