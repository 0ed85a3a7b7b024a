pub mod activate;
pub mod delete;
pub mod get;
pub mod list;
pub mod subjects;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    TeacherSubjectRequest, UpdateTeacherRequest, UpdateTeacherSubjectsRequest,
};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request).await
    }

    // 教授该科目且有空闲课时的教师
    pub async fn list_dictating(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_dictating(self, request, subject_id).await
    }

    pub async fn get_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, id).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, id, update).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, id).await
    }

    pub async fn activate_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        activate::activate_teacher(self, request, id).await
    }

    pub async fn assign_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        body: TeacherSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::assign_subject(self, request, id, body).await
    }

    pub async fn remove_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        body: TeacherSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::remove_subject(self, request, id, body).await
    }

    // 整体替换科目集合
    pub async fn replace_subjects(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateTeacherSubjectsRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::replace_subjects(self, request, id, body).await
    }
}
