use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_individual(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_individual_open_slots().await {
        Ok(slots) if slots.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SlotNotFound, "No individual classes available"),
        )),
        Ok(slots) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            slots,
            "Individual classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve individual classes")),
    }
}

pub async fn list_group(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_group_open_slots().await {
        Ok(slots) if slots.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SlotNotFound, "No group classes available"),
        )),
        Ok(slots) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            slots,
            "Group classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve group classes")),
    }
}
