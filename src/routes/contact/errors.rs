use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::configuration::Environment;
use crate::domain::FieldError;
use crate::routes::helpers::{ApiEnvelope, error_chain_fmt};

#[derive(serde::Serialize)]
struct ValidationFailedResponse {
    success: bool,
    message: String,
    errors: Vec<FieldError>,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Validation failed.")]
    ValidationError(Vec<FieldError>),
    #[error("Failed to deliver the contact emails.")]
    DeliveryError {
        #[source]
        source: anyhow::Error,
        environment: Environment,
    },
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::DeliveryError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::ValidationError(errors) => {
                HttpResponse::UnprocessableEntity().json(ValidationFailedResponse {
                    success: false,
                    message: "Validation failed.".into(),
                    errors: errors.clone(),
                })
            }
            ContactError::DeliveryError {
                source,
                environment,
            } => {
                // The raw cause only leaves the process outside production.
                let message = match environment {
                    Environment::Local => format!("{source:#}"),
                    Environment::Production => "An internal server error occurred.".into(),
                };
                HttpResponse::InternalServerError().json(ApiEnvelope {
                    success: false,
                    message,
                })
            }
        }
    }
}
