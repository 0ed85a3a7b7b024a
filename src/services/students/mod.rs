pub mod delete;
pub mod get;
pub mod history;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::UpdateStudentRequest;
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, update).await
    }

    // 删除学生并释放其全部预约
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, id).await
    }

    // 学生曾预约过、且教授该科目的教师
    pub async fn list_previous_teachers(
        &self,
        request: &HttpRequest,
        id: i64,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        history::list_previous_teachers(self, request, id, subject_id).await
    }

    // 尚未评分的课程
    pub async fn list_unrated_classes(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        history::list_unrated_classes(self, request, id).await
    }
}
