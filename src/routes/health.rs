use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::routes::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_result = match state.store.ping().await {
        Ok(()) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(e) => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("Store ping failed: {}", e)),
        },
    };

    // Any unhealthy dependency degrades the whole service
    let status = if store_result.status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    let mut services = HashMap::new();
    services.insert("store".to_string(), store_result);

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
