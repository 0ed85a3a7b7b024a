use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReservationService;
use crate::models::{ApiResponse, ErrorCode, auth::Role};
use crate::services::{error_response, forbidden, require_principal};

pub async fn delete_reservation(
    service: &ReservationService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let reservation = match storage.get_reservation_by_id(id).await {
        Ok(Some(reservation)) => reservation,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve reservation")),
    };

    // 只有预约双方或管理员可以删除
    if !principal.owns(Role::Student, reservation.student_id)
        && !principal.owns(Role::Teacher, reservation.teacher_id)
    {
        return Ok(forbidden("You are not a party to this reservation"));
    }

    match storage.delete_reservation(id).await {
        Ok(true) => {
            info!("Reservation {} deleted by {} {}", id, principal.role, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Reservation deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ReservationNotFound,
            "Reservation not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete reservation")),
    }
}
