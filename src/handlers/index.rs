// src/handlers/index.rs
use actix_web::HttpResponse;
use serde_json::json;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "usage": "GET /api/data for live server data"
    }))
}

pub async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}
