use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReservationService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_for_student(
    service: &ReservationService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve student")),
    }

    match storage.list_student_reservations(student_id).await {
        Ok(list) if list.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(
                ErrorCode::ReservationNotFound,
                "No reservations found for this student.",
            ),
        )),
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Reservations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve reservations")),
    }
}

pub async fn list_for_teacher(
    service: &ReservationService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to retrieve teacher")),
    }

    let horizon = chrono::Duration::days(AppConfig::get().schedule.teacher_horizon_days);
    let now = chrono::Utc::now();
    let until = now + horizon;

    match storage
        .list_teacher_reservations_between(teacher_id, now.timestamp(), until.timestamp())
        .await
    {
        Ok(list) if list.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(
                ErrorCode::ReservationNotFound,
                "No reservations found for this teacher in the next five days.",
            ),
        )),
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Reservations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve reservations")),
    }
}
