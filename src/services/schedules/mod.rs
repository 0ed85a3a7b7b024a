pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::requests::CreateWeeklyScheduleRequest;
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
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

    // 创建每周模板并展开 4 周课时
    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        body: CreateWeeklyScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, body).await
    }

    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, teacher_id).await
    }
}
