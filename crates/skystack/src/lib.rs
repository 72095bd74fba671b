//! skystack
//!
//! Stage-aware infrastructure synthesis for AWS and Cloudflare.
//!
//! A stack reads a layered JSON context (base → extra contexts → stage
//! context), derives its properties, and hands a synthesis scope to a set
//! of resource managers. Every manager call registers declarative resource
//! definitions with stage-suffixed physical names plus named outputs, and
//! the result is written as one `<stack>-<stage>.json` template.
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                application construct             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                   skystack                       │
//! │   Stack (context → props → synth)                │
//! │   Construct (one manager per resource domain)    │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ skystack-aws  │ │  skystack-    │
//! │   managers    │ │  cloudflare   │
//! └───────────────┘ └───────────────┘
//! ```

pub mod construct;
pub mod error;
pub mod stack;

// Re-exports
pub use construct::Construct;
pub use error::{Result, StackError};
pub use stack::Stack;

pub use skystack_config::{Context, ContextBuilder};
pub use skystack_core::{Resource, StackProps, Synth};

pub use skystack_aws as aws;
pub use skystack_cloudflare as cloudflare;
