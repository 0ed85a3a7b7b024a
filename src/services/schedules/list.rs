use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_weekly_schedules(teacher_id).await {
        Ok(schedules) if schedules.is_empty() => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "No schedules found for this teacher",
            )))
        }
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedules,
            "Schedules retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve schedules")),
    }
}
