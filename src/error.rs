use std::{error::Error, fmt::Debug};

use crate::validation::FieldError;

#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("Invalid API base url '{0}'")]
    BaseUrlError(String),

    #[error("Failed to build HTTP client")]
    ClientError(#[source] reqwest::Error),

    #[error("Unable to connect to {0}")]
    ConnectionError(String, #[source] reqwest::Error),

    #[error("Request to {0} failed")]
    RequestError(String, #[source] reqwest::Error),

    #[error("Failed to read response")]
    ReadError(#[source] reqwest::Error),

    #[error("API responded {status}: {detail}")]
    ApiStatus { status: u16, detail: String },

    #[error("Invalid JSON body")]
    JsonError(#[source] serde_json::Error),

    #[error("Draft is not ready for submission")]
    NotSubmittable,

    #[error("Unknown customer '{0}'")]
    UnknownCustomer(String),

    #[error("Unknown product '{0}'")]
    UnknownProduct(String),

    #[error("Invalid fields: {}", join_fields(.0))]
    ValidationError(Vec<FieldError>),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CustomError {
    /// Message suitable for showing to console staff.
    pub fn user_message(&self) -> String {
        match self {
            CustomError::ApiStatus { detail, .. } if !detail.is_empty() => detail.clone(),
            CustomError::ConnectionError(..) => "The server is unreachable".to_string(),
            other => other.to_string(),
        }
    }
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
