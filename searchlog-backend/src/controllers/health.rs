use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
    cfg.service(web::resource("/api/health/storage").route(web::get().to(get_storage_status)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs()
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

/// Where the collections live and how many rows each holds
async fn get_storage_status(state: web::Data<AppState>) -> impl Responder {
    let counts = (
        state.db.list_sites().map(|v| v.len()),
        state.db.list_logs().map(|v| v.len()),
        state.db.list_memos().map(|v| v.len()),
        state.db.list_records().map(|v| v.len()),
    );

    match counts {
        (Ok(sites), Ok(logs), Ok(memos), Ok(records)) => HttpResponse::Ok().json(serde_json::json!({
            "data_dir": state.config.data_dir.to_string_lossy(),
            "frontend_enabled": state.config.frontend_dir.is_some(),
            "sites": sites,
            "logs": logs,
            "memos": memos,
            "records": records
        })),
        (Err(e), ..) | (_, Err(e), ..) | (_, _, Err(e), _) | (.., Err(e)) => {
            super::error_response("Failed to read collections", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_and_storage() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::state())
                .configure(config_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], VERSION);

        let req = test::TestRequest::get().uri("/api/version").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "version": VERSION }));

        let req = test::TestRequest::get().uri("/api/health/storage").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["logs"], 0);
    }
}
