//! Memo REST API, including memo -> log draft conversion

use actix_web::{web, Responder};
use searchlog_types::{CreatedId, DeletedIds, MemoInput};

use super::{error_response, not_found, ok};
use crate::AppState;

async fn list_memos(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_memo_views() {
        Ok(memos) => ok(memos),
        Err(e) => error_response("Failed to list memos", e),
    }
}

async fn create_memo(data: web::Data<AppState>, body: web::Json<MemoInput>) -> impl Responder {
    match data.db.create_memo(body.into_inner()) {
        Ok(id) => ok(CreatedId { id }),
        Err(e) => error_response("Failed to create memo", e),
    }
}

async fn update_memo(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<MemoInput>,
) -> impl Responder {
    let id = path.into_inner();
    match data.db.update_memo(&id, body.into_inner()) {
        Ok(true) => ok(CreatedId { id }),
        Ok(false) => not_found("memo", &id),
        Err(e) => error_response("Failed to update memo", e),
    }
}

async fn delete_memo(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.db.delete_memo(&id) {
        Ok(removed) => ok(DeletedIds {
            deleted: if removed { vec![id] } else { Vec::new() },
        }),
        Err(e) => error_response("Failed to delete memo", e),
    }
}

/// Prefilled log form for a memo; the client posts it to /api/logs
async fn convert_memo(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.convert_memo(&path) {
        Ok(draft) => ok(draft),
        Err(e) => error_response("Failed to convert memo", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/memos")
            .route("", web::get().to(list_memos))
            .route("", web::post().to(create_memo))
            .route("/{id}", web::put().to(update_memo))
            .route("/{id}", web::delete().to(delete_memo))
            .route("/{id}/convert", web::get().to(convert_memo)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_convert_memo() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::state())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/memos")
            .set_json(json!({ "site_id": "s1", "word": "lifetimes", "description": "elision rules" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/memos/{}/convert", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"],
            json!({ "site_id": "s1", "word": "lifetimes", "result": "elision rules" })
        );

        let req = test::TestRequest::get().uri("/api/memos").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["site_name"], "unspecified");

        let req = test::TestRequest::get().uri("/api/memos/ghost/convert").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
