use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ScheduleService;
use crate::config::AppConfig;
use crate::errors::{LinkLearnError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    schedules::{
        requests::{CreateWeeklyScheduleRequest, NewWeeklySchedule},
        responses::CreateWeeklyScheduleResponse,
    },
};
use crate::services::{error_response, forbidden, require_principal};
use crate::utils::schedule::{fixed_offset, next_occurrence, parse_time};

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    body: CreateWeeklyScheduleRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    // 教师只能为自己创建；管理员必须指定教师
    let teacher_id = match (principal.role, body.teacher_id) {
        (Role::Admin, Some(id)) => id,
        (Role::Admin, None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ScheduleInvalid,
                "teacher_id is required",
            )));
        }
        (_, Some(id)) if id != principal.id => {
            return Ok(forbidden("You can only create schedules for yourself"));
        }
        _ => principal.id,
    };

    let schedule = match validate_schedule(teacher_id, &body) {
        Ok(schedule) => schedule,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, e.message())));
        }
    };

    let config = AppConfig::get();
    let first_occurrence = match fixed_offset(config.schedule.utc_offset_hours).and_then(|offset| {
        next_occurrence(
            chrono::Utc::now(),
            schedule.day_of_week as u32,
            schedule.start_time,
            &offset,
        )
    }) {
        Ok(at) => at,
        Err(e) => return Ok(error_response(&e, "Failed to compute schedule start")),
    };

    let storage = service.get_storage(request);
    match storage.create_weekly_schedule(schedule, first_occurrence).await {
        Ok((schedule, slots)) => {
            info!(
                "Weekly schedule {} created by {} {} ({} slots)",
                schedule.id,
                principal.role,
                principal.id,
                slots.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreateWeeklyScheduleResponse { schedule, slots },
                "Schedule created successfully",
            )))
        }
        Err(LinkLearnError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TeacherNotFound, msg))),
        Err(e) => Ok(error_response(&e, "Failed to create schedule")),
    }
}

/// 校验请求并转换为存储参数
fn validate_schedule(
    teacher_id: i64,
    body: &CreateWeeklyScheduleRequest,
) -> Result<NewWeeklySchedule> {
    if !(1..=7).contains(&body.day_of_week) {
        return Err(LinkLearnError::validation(
            "day_of_week must be between 1 (Monday) and 7 (Sunday)",
        ));
    }
    let start_time = parse_time(&body.start_time)?;
    let end_time = parse_time(&body.end_time)?;
    if start_time >= end_time {
        return Err(LinkLearnError::validation(
            "start_time must be earlier than end_time",
        ));
    }
    if body.max_students < 1 {
        return Err(LinkLearnError::validation("max_students must be at least 1"));
    }

    Ok(NewWeeklySchedule {
        teacher_id,
        day_of_week: body.day_of_week,
        start_time,
        end_time,
        max_students: body.max_students,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(day: i32, start: &str, end: &str, max: i32) -> CreateWeeklyScheduleRequest {
        CreateWeeklyScheduleRequest {
            teacher_id: None,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            max_students: max,
        }
    }

    #[test]
    fn test_valid_schedule() {
        let schedule = validate_schedule(3, &request(2, "10:00", "11:00:00", 4)).unwrap();
        assert_eq!(schedule.teacher_id, 3);
        assert_eq!(schedule.day_of_week, 2);
        assert_eq!(schedule.max_students, 4);
    }

    #[test]
    fn test_invalid_schedule() {
        assert!(validate_schedule(1, &request(0, "10:00", "11:00", 1)).is_err());
        assert!(validate_schedule(1, &request(8, "10:00", "11:00", 1)).is_err());
        assert!(validate_schedule(1, &request(1, "11:00", "10:00", 1)).is_err());
        assert!(validate_schedule(1, &request(1, "10:00", "10:00", 1)).is_err());
        assert!(validate_schedule(1, &request(1, "10:00", "11:00", 0)).is_err());
        assert!(validate_schedule(1, &request(1, "25:00", "26:00", 1)).is_err());
    }
}
