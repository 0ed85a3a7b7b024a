pub mod create;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::CreateSubjectRequest;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_subjects(self, request).await
    }

    pub async fn list_dictated_subjects(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_dictated_subjects(self, request).await
    }

    pub async fn get_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, id).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        body: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, body).await
    }
}
