//! Site REST API

use actix_web::{web, Responder};
use searchlog_types::{CreatedId, DeletedIds, SiteInput};

use super::{error_response, not_found, ok};
use crate::AppState;

async fn list_sites(data: web::Data<AppState>) -> impl Responder {
    match data.db.list_sites() {
        Ok(sites) => ok(sites),
        Err(e) => error_response("Failed to list sites", e),
    }
}

async fn get_site(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match data.db.get_site(&path) {
        Ok(site) => ok(site),
        Err(e) => error_response("Failed to read site", e),
    }
}

async fn create_site(data: web::Data<AppState>, body: web::Json<SiteInput>) -> impl Responder {
    match data.db.create_site(body.into_inner()) {
        Ok(id) => ok(CreatedId { id }),
        Err(e) => error_response("Failed to create site", e),
    }
}

async fn update_site(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SiteInput>,
) -> impl Responder {
    let id = path.into_inner();
    match data.db.update_site(&id, body.into_inner()) {
        Ok(true) => ok(CreatedId { id }),
        Ok(false) => not_found("site", &id),
        Err(e) => error_response("Failed to update site", e),
    }
}

/// Logs and memos of the site are kept; they render as "unknown" afterwards
async fn delete_site(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.db.delete_site(&id) {
        Ok(removed) => ok(DeletedIds {
            deleted: if removed { vec![id] } else { Vec::new() },
        }),
        Err(e) => error_response("Failed to delete site", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/sites")
            .route("", web::get().to(list_sites))
            .route("", web::post().to(create_site))
            .route("/{id}", web::get().to(get_site))
            .route("/{id}", web::put().to(update_site))
            .route("/{id}", web::delete().to(delete_site)),
    );
}
