use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, classes::entities::AvailabilitySlot};
use crate::services::error_response;
use crate::utils::schedule::{availability_view, fixed_offset};

pub async fn teacher_availability(
    service: &ClassService,
    request: &HttpRequest,
    teacher_id: i64,
    subject_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let offset = match fixed_offset(config.schedule.utc_offset_hours) {
        Ok(offset) => offset,
        Err(e) => return Ok(error_response(&e, "Invalid schedule offset")),
    };

    match storage.list_teacher_open_slots(teacher_id, subject_id).await {
        Ok(slots) if slots.is_empty() => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SlotNotFound,
                "No available classes for this teacher",
            )))
        }
        Ok(slots) => {
            let view: Vec<AvailabilitySlot> = slots
                .iter()
                .map(|slot| availability_view(slot, &offset, config.schedule.slot_duration_minutes))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                view,
                "Availability retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, "Failed to retrieve availability")),
    }
}
