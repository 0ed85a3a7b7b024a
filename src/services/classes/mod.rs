pub mod availability;
pub mod open;
pub mod vacation;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::{Principal, Role};
use crate::models::classes::requests::{AssignVacationRequest, StopVacationRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::forbidden;
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 一对一开放课时
    pub async fn list_individual(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        open::list_individual(self, request).await
    }

    // 小组开放课时
    pub async fn list_group(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        open::list_group(self, request).await
    }

    pub async fn assign_vacation(
        &self,
        request: &HttpRequest,
        body: AssignVacationRequest,
    ) -> ActixResult<HttpResponse> {
        vacation::assign_vacation(self, request, body).await
    }

    pub async fn stop_vacation(
        &self,
        request: &HttpRequest,
        body: StopVacationRequest,
    ) -> ActixResult<HttpResponse> {
        vacation::stop_vacation(self, request, body).await
    }

    // 教师可用时段，可按科目过滤
    pub async fn teacher_availability(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        subject_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        availability::teacher_availability(self, request, teacher_id, subject_id).await
    }
}

/// 解析操作目标教师：教师只能操作自己，管理员必须显式指定
pub(crate) fn resolve_teacher(
    principal: &Principal,
    requested: Option<i64>,
) -> Result<i64, HttpResponse> {
    match (principal.role, requested) {
        (Role::Admin, Some(id)) => Ok(id),
        (Role::Admin, None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id is required",
        ))),
        (_, Some(id)) if id != principal.id => {
            Err(forbidden("You can only manage your own classes"))
        }
        _ => Ok(principal.id),
    }
}
