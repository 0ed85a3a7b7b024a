pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{common::Party, ratings::requests::SubmitRatingRequest};
use crate::storage::Storage;

pub struct RatingService {
    storage: Option<Arc<dyn Storage>>,
}

impl RatingService {
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

    pub async fn get_rating(
        &self,
        request: &HttpRequest,
        party: Party,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_rating(self, request, party, id).await
    }

    pub async fn submit_rating(
        &self,
        request: &HttpRequest,
        party: Party,
        id: i64,
        body: SubmitRatingRequest,
    ) -> ActixResult<HttpResponse> {
        update::submit_rating(self, request, party, id, body).await
    }
}
