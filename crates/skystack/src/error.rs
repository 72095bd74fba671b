//! Stack-level error type

use thiserror::Error;

/// Errors raised while bootstrapping a stack
#[derive(Error, Debug)]
pub enum StackError {
    #[error(transparent)]
    Config(#[from] skystack_config::ConfigError),

    #[error(transparent)]
    Synth(#[from] skystack_core::SynthError),
}

pub type Result<T> = std::result::Result<T, StackError>;
