use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RatingService;
use crate::models::{
    ApiResponse, ErrorCode, common::Party, ratings::responses::RatingResponse,
};
use crate::services::error_response;
use crate::utils::rating::format_rating;

pub(super) fn not_found_code(party: Party) -> ErrorCode {
    match party {
        Party::Student => ErrorCode::StudentNotFound,
        Party::Teacher => ErrorCode::TeacherNotFound,
    }
}

pub async fn get_rating(
    service: &RatingService,
    request: &HttpRequest,
    party: Party,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_rating(party, id).await {
        Ok(Some(summary)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RatingResponse {
                rating: format_rating(&summary),
                total_ratings: summary.total_ratings,
            },
            "Rating retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            not_found_code(party),
            format!("{} not found", party.label()),
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve rating")),
    }
}
