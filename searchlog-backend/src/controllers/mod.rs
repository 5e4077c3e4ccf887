pub mod health;
pub mod logs;
pub mod memos;
pub mod records;
pub mod sites;

use actix_web::HttpResponse;
use searchlog_types::ApiResponse;
use serde::Serialize;

use crate::error::{DbError, LogTreeError};

pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

pub(crate) fn not_found(kind: &str, id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::err(format!("{} {:?} not found", kind, id)))
}

/// Map a repository error to its HTTP status: missing ids are 404, cycles
/// 409, storage failures 500
pub(crate) fn error_response(context: &str, err: DbError) -> HttpResponse {
    if err.is_not_found() {
        return HttpResponse::NotFound().json(ApiResponse::<()>::err(err.to_string()));
    }
    match &err {
        DbError::Tree(LogTreeError::Cycle { .. }) => {
            HttpResponse::Conflict().json(ApiResponse::<()>::err(err.to_string()))
        }
        _ => {
            log::error!("{}: {}", context, err);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::err(format!("{}: {}", context, err)))
        }
    }
}
