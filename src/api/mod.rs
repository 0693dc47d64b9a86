use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ErrorResponse};

pub mod error;
pub mod todos;
pub mod validation;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Resource not found".to_string(),
    })
}

/// Unreadable JSON bodies get the same `{error}` shape as every other
/// validation failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected request body");
        actix_web::Error::from(ApiError::validation("Request body must be a JSON object"))
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(healthcheck)
        .service(todos::list_todos)
        .service(todos::create_todo)
        .service(todos::set_completed)
        .service(todos::delete_todo);
}
