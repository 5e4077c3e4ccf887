//! Record REST API. Records are returned as Markdown source; rendering is
//! left to the client.

use actix_web::{web, Responder};
use searchlog_types::{CreatedId, DeletedIds, RecordInput};

use super::{error_response, not_found, ok};
use crate::AppState;

async fn list_records(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_records() {
        Ok(records) => ok(records),
        Err(e) => error_response("Failed to list records", e),
    }
}

async fn get_record(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.get_record(&path) {
        Ok(record) => ok(record),
        Err(e) => error_response("Failed to read record", e),
    }
}

async fn create_record(data: web::Data<AppState>, body: web::Json<RecordInput>) -> impl Responder {
    match data.db.create_record(body.into_inner()) {
        Ok(id) => ok(CreatedId { id }),
        Err(e) => error_response("Failed to create record", e),
    }
}

async fn update_record(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RecordInput>,
) -> impl Responder {
    let id = path.into_inner();
    match data.db.update_record(&id, body.into_inner()) {
        Ok(true) => ok(CreatedId { id }),
        Ok(false) => not_found("record", &id),
        Err(e) => error_response("Failed to update record", e),
    }
}

async fn delete_record(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.db.delete_record(&id) {
        Ok(removed) => ok(DeletedIds {
            deleted: if removed { vec![id] } else { Vec::new() },
        }),
        Err(e) => error_response("Failed to delete record", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/records")
            .route("", web::get().to(list_records))
            .route("", web::post().to(create_record))
            .route("/{id}", web::get().to(get_record))
            .route("/{id}", web::put().to(update_record))
            .route("/{id}", web::delete().to(delete_record)),
    );
}
