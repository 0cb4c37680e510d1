use crate::services::UserService;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// GET /health
pub async fn health(users: web::Data<UserService>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "user-service",
        "store": users.store_kind(),
    }))
}
