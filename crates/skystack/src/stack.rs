//! Stack bootstrap
//!
//! Builds the merged context (once, at construction), derives the stack
//! properties, creates the synthesis scope, and instantiates the root
//! construct.

use crate::construct::Construct;
use crate::error::Result;
use serde_json::{Map, Value};
use skystack_config::ContextBuilder;
use skystack_core::{StackProps, Synth};
use std::path::Path;
use tracing::{info, instrument};

/// A deployable stack
///
/// `construct` and `synth` are separate fields so application code can hold
/// a manager and the synthesis scope at the same time:
///
/// ```ignore
/// let props = stack.construct.context.resource("buckets", "site")?;
/// stack.construct.storage.create_bucket("site", &mut stack.synth, &props)?;
/// ```
pub struct Stack {
    pub construct: Construct,
    pub synth: Synth,
}

impl Stack {
    /// Bootstrap from `skystack.json` at the project root
    #[instrument(skip(project_root), fields(project_root = %project_root.as_ref().display()))]
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self> {
        let context = ContextBuilder::from_file(project_root.as_ref())?.build()?;
        Self::from_builder_output(context)
    }

    /// Bootstrap from a base context assembled in code
    #[instrument(skip(project_root, base), fields(project_root = %project_root.as_ref().display()))]
    pub fn load_with_base(
        project_root: impl AsRef<Path>,
        base: Map<String, Value>,
    ) -> Result<Self> {
        let context = ContextBuilder::new(project_root.as_ref(), base).build()?;
        Self::from_builder_output(context)
    }

    fn from_builder_output(context: skystack_config::Context) -> Result<Self> {
        let props = StackProps::from_context(&context)?;
        let synth = Synth::new(&props.name, &props.stage);

        info!(stack = %props.name, stage = %props.stage, "Stack bootstrapped");
        Ok(Self {
            construct: Construct::new(props, context),
            synth,
        })
    }

    pub fn props(&self) -> &StackProps {
        &self.construct.props
    }

    /// Write the synthesized template to `<dir>/<stack>-<stage>.json`
    pub fn write_template(&self, dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
        Ok(self.synth.write_to(dir.as_ref())?)
    }
}
