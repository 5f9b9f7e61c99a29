use std::error::Error;

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError},
};

/// Every response body leaving the API carries this shape (validation
/// failures extend it with a field-error list).
#[derive(serde::Serialize)]
pub struct ApiEnvelope {
    pub success: bool,
    pub message: String,
}

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiEnvelope {
        success: false,
        message: "Route not found.".into(),
    })
}

/// Unparseable or oversized JSON bodies still answer with the envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiEnvelope {
        success: false,
        message: "Invalid request body.".into(),
    });
    InternalError::from_response(err, response).into()
}
