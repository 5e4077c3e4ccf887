//! Log REST API: tree listing, CRUD, cascading deletes and the
//! drag-and-drop move endpoint.

use actix_web::{web, HttpResponse, Responder};
use searchlog_types::{ApiResponse, CreatedId, DeletedIds, LogInput, LogUpdate, MoveLogRequest};
use serde::Deserialize;

use super::{error_response, not_found, ok};
use crate::AppState;

#[derive(Debug, Deserialize)]
struct LogTreeQuery {
    site_id: Option<String>,
}

/// Log forest, optionally restricted to one site's root logs
async fn list_logs(data: web::Data<AppState>, query: web::Query<LogTreeQuery>) -> impl Responder {
    match data.db.log_tree(query.site_id.as_deref()) {
        Ok(tree) => ok(tree),
        Err(e) => error_response("Failed to list logs", e),
    }
}

async fn get_log(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.log_detail(&path) {
        Ok(detail) => ok(detail),
        Err(e) => error_response("Failed to read log", e),
    }
}

async fn create_log(data: web::Data<AppState>, body: web::Json<LogInput>) -> impl Responder {
    match data.db.create_log(body.into_inner()) {
        Ok(id) => ok(CreatedId { id }),
        Err(e) => error_response("Failed to create log", e),
    }
}

async fn update_log(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<LogUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    match data.db.update_log(&id, body.into_inner()) {
        Ok(true) => ok(CreatedId { id }),
        Ok(false) => not_found("log", &id),
        Err(e) => error_response("Failed to update log", e),
    }
}

/// Delete a log and everything below it. Deleting a missing log succeeds
/// with an empty id list.
async fn delete_log(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.delete_log(&path) {
        Ok(deleted) => ok(DeletedIds { deleted }),
        Err(e) => error_response("Failed to delete log", e),
    }
}

async fn delete_logs_by_site(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.delete_logs_by_site(&path) {
        Ok(deleted) => ok(DeletedIds { deleted }),
        Err(e) => error_response("Failed to delete site logs", e),
    }
}

async fn delete_all_logs(data: web::Data<AppState>) -> impl Responder {
    match data.db.delete_all_logs() {
        Ok(count) => ok(serde_json::json!({ "deleted_count": count })),
        Err(e) => error_response("Failed to delete logs", e),
    }
}

/// 200 on success, 404 for an unknown log, 409 when the target lies in the
/// moved log's own subtree
async fn move_log(data: web::Data<AppState>, body: web::Json<MoveLogRequest>) -> impl Responder {
    match data.db.move_log(&body.log_id, body.target()) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success()),
        Err(e) => error_response("Failed to move log", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/log/move", web::post().to(move_log));
    cfg.service(
        web::scope("/api/logs")
            .route("", web::get().to(list_logs))
            .route("", web::post().to(create_log))
            .route("", web::delete().to(delete_all_logs))
            .route("/site/{site_id}", web::delete().to(delete_logs_by_site))
            .route("/{id}", web::get().to(get_log))
            .route("/{id}", web::put().to(update_log))
            .route("/{id}", web::delete().to(delete_log)),
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
    async fn test_create_list_and_move() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/logs")
            .set_json(json!({ "site_id": "s1", "word": "parent" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let parent = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/logs")
            .set_json(json!({ "site_id": "s1", "word": "child" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let child = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/log/move")
            .set_json(json!({ "log_id": child, "target_id": parent }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));

        let req = test::TestRequest::get().uri("/api/logs?site_id=s1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let roots = body["data"].as_array().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0]["id"], parent.as_str());
        assert_eq!(roots[0]["site_name"], "unknown");
        assert_eq!(roots[0]["children"][0]["id"], child.as_str());

        let req = test::TestRequest::post()
            .uri("/api/log/move")
            .set_json(json!({ "log_id": child, "target_id": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.db.log_tree(None).unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_move_status_codes() {
        let state = test_support::state();
        let a = state
            .db
            .create_log(LogInput {
                word: "a".into(),
                ..Default::default()
            })
            .unwrap();
        let b = state
            .db
            .create_log(LogInput {
                word: "b".into(),
                parent_id: a.clone(),
                ..Default::default()
            })
            .unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/log/move")
            .set_json(json!({ "log_id": "ghost", "target_id": a }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/log/move")
            .set_json(json!({ "log_id": a, "target_id": b }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/log/move")
            .set_json(json!({ "log_id": b, "target_id": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_delete_cascades_and_missing_is_ok() {
        let state = test_support::state();
        let a = state.db.create_log(LogInput::default()).unwrap();
        let b = state
            .db
            .create_log(LogInput {
                parent_id: a.clone(),
                ..Default::default()
            })
            .unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::delete().uri(&format!("/api/logs/{}", a)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["deleted"], json!([a, b]));

        let req = test::TestRequest::delete().uri(&format!("/api/logs/{}", a)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["deleted"], json!([]));
    }

    #[actix_web::test]
    async fn test_get_and_update_missing_log_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(test_support::state())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/logs/ghost").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/logs/ghost")
            .set_json(json!({ "word": "x" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
