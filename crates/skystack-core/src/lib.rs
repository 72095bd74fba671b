//! Synthesis core for skystack
//!
//! The pieces shared by every provider crate: the synthesis scope that
//! collects resources and outputs, the stack properties derived from the
//! merged context, and the stage-suffixed naming convention.

pub mod error;
pub mod naming;
pub mod props;
pub mod synth;

// Re-exports
pub use error::{Result, SynthError};
pub use naming::{output_name, stage_domain, stage_name};
pub use props::StackProps;
pub use synth::{Resource, Synth};
