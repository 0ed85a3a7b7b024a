use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, resolve_teacher};
use crate::config::AppConfig;
use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::{AssignVacationRequest, StopVacationRequest},
};
use crate::services::{error_response, require_principal};
use crate::utils::schedule::{fixed_offset, vacation_window};

pub async fn assign_vacation(
    service: &ClassService,
    request: &HttpRequest,
    body: AssignVacationRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    let teacher_id = match resolve_teacher(&principal, body.teacher_id) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let config = AppConfig::get();
    let window = fixed_offset(config.schedule.utc_offset_hours)
        .and_then(|offset| vacation_window(body.start_date, body.end_date, &offset));
    let (from, until) = match window {
        Ok(window) => window,
        Err(e) => return Ok(error_response(&e, "Failed to compute vacation window")),
    };

    let storage = service.get_storage(request);
    match storage.assign_vacation(teacher_id, from, until).await {
        Ok(slots) => {
            info!(
                "Vacation assigned to teacher {} from {} to {} ({} slots)",
                teacher_id,
                body.start_date,
                body.end_date,
                slots.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                slots,
                "Vacation assigned successfully",
            )))
        }
        // 窗口内已有学生的课时不可被假期覆盖
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::VacationConflict, msg))),
        Err(e) => Ok(error_response(&e, "Failed to assign vacation")),
    }
}

pub async fn stop_vacation(
    service: &ClassService,
    request: &HttpRequest,
    body: StopVacationRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    let teacher_id = match resolve_teacher(&principal, body.teacher_id) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.stop_vacation(teacher_id).await {
        Ok(released) => {
            info!("Vacation stopped for teacher {} ({} slots released)", teacher_id, released);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Vacation stopped successfully")))
        }
        Err(e) => Ok(error_response(&e, "Failed to stop vacation")),
    }
}
