pub mod create;
pub mod delete;
pub mod list;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reservations::requests::{
    CreateReservationRequest, UpdateReservationStatusRequest,
};
use crate::storage::Storage;

pub struct ReservationService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReservationService {
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

    pub async fn create_reservation(
        &self,
        request: &HttpRequest,
        body: CreateReservationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_reservation(self, request, body).await
    }

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_for_student(self, request, student_id).await
    }

    // 教师未来若干天内的预约
    pub async fn list_for_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_for_teacher(self, request, teacher_id).await
    }

    pub async fn delete_reservation(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_reservation(self, request, id).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateReservationStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, request, id, body).await
    }
}
