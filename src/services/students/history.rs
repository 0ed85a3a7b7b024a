use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, auth::Role};
use crate::services::{error_response, forbidden, require_principal};

pub async fn list_previous_teachers(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Student, id) {
        return Ok(forbidden("You can only view your own history"));
    }

    let storage = service.get_storage(request);
    match storage.list_previous_teachers(id, subject_id).await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teachers,
            "Previous teachers retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve previous teachers")),
    }
}

pub async fn list_unrated_classes(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if !principal.owns(Role::Student, id) {
        return Ok(forbidden("You can only view your own classes"));
    }

    let storage = service.get_storage(request);
    match storage.list_unrated_classes(id).await {
        Ok(classes) if classes.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ReservationNotFound, "No unrated classes found"),
        )),
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Unrated classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve unrated classes")),
    }
}
