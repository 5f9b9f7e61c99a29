use actix_web::{HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;

#[derive(serde::Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

pub async fn health_check() -> impl Responder {
    let request_id = Uuid::new_v4();

    let request_span = tracing::info_span!(
        "Health check",
        %request_id
    );

    let _request_span_guard = request_span.enter();

    HttpResponse::Ok().json(HealthResponse {
        success: true,
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        service: "DevTech Pro API",
    })
}
