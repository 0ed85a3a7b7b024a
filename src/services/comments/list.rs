use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommentService;
use crate::models::{ApiResponse, ErrorCode, common::Party};
use crate::services::error_response;

pub async fn list_comments(
    service: &CommentService,
    request: &HttpRequest,
    party: Party,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_comments(party, id).await {
        Ok(comments) if comments.is_empty() => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(
                ErrorCode::CommentNotFound,
                format!("No comments found for this {party}"),
            ),
        )),
        Ok(comments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            comments,
            "Comments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve comments")),
    }
}
