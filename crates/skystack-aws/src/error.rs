//! AWS manager error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Invalid properties for {resource} '{id}': {message}")]
    InvalidProps {
        resource: &'static str,
        id: String,
        message: String,
    },

    #[error(transparent)]
    Synth(#[from] skystack_core::SynthError),
}

impl AwsError {
    pub(crate) fn invalid_props(
        resource: &'static str,
        id: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidProps {
            resource,
            id: id.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
