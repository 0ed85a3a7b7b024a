use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReservationService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    reservations::{entities::ReservationStatus, requests::UpdateReservationStatusRequest},
};
use crate::services::{error_response, forbidden, require_principal};

pub async fn update_status(
    service: &ReservationService,
    request: &HttpRequest,
    id: i64,
    body: UpdateReservationStatusRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    if body.status == ReservationStatus::Booked {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ReservationInvalid,
            "Status must be completed or cancelled",
        )));
    }

    let storage = service.get_storage(request);
    match storage.get_reservation_by_id(id).await {
        Ok(Some(reservation)) if !principal.owns(Role::Teacher, reservation.teacher_id) => {
            return Ok(forbidden("You can only update your own classes"));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve reservation")),
    }

    match storage.update_reservation_status(id, body.status).await {
        Ok(Some(reservation)) => {
            info!("Reservation {} marked {}", id, reservation.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                reservation,
                "Reservation status updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ReservationNotFound,
            "Reservation not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update reservation status")),
    }
}
