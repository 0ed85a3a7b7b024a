use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{RatingService, get::not_found_code};
use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::Role,
    common::Party,
    ratings::{requests::SubmitRatingRequest, responses::RatingResponse},
};
use crate::services::{error_response, forbidden, require_principal};
use crate::utils::rating::{format_rating, validate_rating};

pub async fn submit_rating(
    service: &RatingService,
    request: &HttpRequest,
    party: Party,
    id: i64,
    body: SubmitRatingRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    // 不能给自己评分
    let own_role = match party {
        Party::Student => Role::Student,
        Party::Teacher => Role::Teacher,
    };
    if principal.role == own_role && principal.id == id {
        return Ok(forbidden("You cannot rate yourself"));
    }

    if let Err(e) = validate_rating(body.rating) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::RatingInvalid, e.message())));
    }

    let storage = service.get_storage(request);
    match storage
        .submit_rating(party, id, body.rating, body.reservation_id)
        .await
    {
        Ok(summary) => {
            info!(
                "{} {} rated {} by {} {} (total {})",
                party.label(),
                id,
                body.rating,
                principal.role,
                principal.id,
                summary.total_ratings
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RatingResponse {
                    rating: format_rating(&summary),
                    total_ratings: summary.total_ratings,
                },
                "Rating updated successfully",
            )))
        }
        Err(LinkLearnError::NotFound(msg)) if msg.starts_with("Reservation") => Ok(
            HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::ReservationNotFound, msg)),
        ),
        Err(LinkLearnError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(not_found_code(party), msg))),
        Err(LinkLearnError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::RatingInvalid, msg))),
        Err(e) => Ok(error_response(&e, "Failed to update rating")),
    }
}
