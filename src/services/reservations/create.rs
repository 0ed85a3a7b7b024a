use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ReservationService;
use crate::config::AppConfig;
use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    reservations::requests::{CreateReservationRequest, NewReservation},
};
use crate::services::{error_response, forbidden, require_principal};
use crate::utils::schedule::{fixed_offset, parse_time};

pub async fn create_reservation(
    service: &ReservationService,
    request: &HttpRequest,
    body: CreateReservationRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    // 学生只能为自己预约；管理员必须指定学生
    let student_id = match (principal.role, body.student_id) {
        (Role::Admin, Some(id)) => id,
        (Role::Admin, None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ReservationInvalid,
                "student_id is required",
            )));
        }
        (_, Some(id)) if id != principal.id => {
            return Ok(forbidden("You can only book classes for yourself"));
        }
        _ => principal.id,
    };

    let start_time = match body.start_time.as_deref().map(parse_time).transpose() {
        Ok(t) => t,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ReservationInvalid, e.message())));
        }
    };

    let offset = match fixed_offset(AppConfig::get().schedule.utc_offset_hours) {
        Ok(offset) => offset,
        Err(e) => return Ok(error_response(&e, "Invalid schedule offset")),
    };

    let new_reservation = NewReservation {
        student_id,
        teacher_id: body.teacher_id,
        subject_id: body.subject_id,
        schedule_id: body.schedule_id,
        datetime: body.datetime,
        day_of_week: body.day_of_week,
        start_time,
    };

    let storage = service.get_storage(request);
    match storage.create_reservation(new_reservation, offset).await {
        Ok(reservation) => {
            info!(
                "Reservation {} created: student {} with teacher {} at {}",
                reservation.id, reservation.student_id, reservation.teacher_id, reservation.datetime
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(reservation, "Reservation created successfully")))
        }
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::ReservationConflict, msg))),
        Err(LinkLearnError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ReservationInvalid, msg))),
        Err(e) => Ok(error_response(&e, "Failed to create reservation")),
    }
}
