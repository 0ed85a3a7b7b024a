use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CommentService;
use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode, comments::requests::CreateCommentRequest, common::Party,
};
use crate::services::error_response;
use crate::utils::validate::validate_comment;

pub async fn add_comment(
    service: &CommentService,
    request: &HttpRequest,
    party: Party,
    id: i64,
    body: CreateCommentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_comment(body.comment.as_deref(), body.commenter_name.as_deref()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CommentInvalid, msg)));
    }
    let comment = body.comment.unwrap_or_default();
    let commenter_name = body.commenter_name.unwrap_or_default();

    let storage = service.get_storage(request);
    match storage
        .add_comment(party, id, comment.trim(), commenter_name.trim())
        .await
    {
        Ok(created) => {
            info!("Comment {} added to {} {}", created.comment_id, party, id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(created, "Comment added successfully")))
        }
        Err(LinkLearnError::NotFound(msg)) => {
            let code = match party {
                Party::Student => ErrorCode::StudentNotFound,
                Party::Teacher => ErrorCode::TeacherNotFound,
            };
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg)))
        }
        Err(e) => Ok(error_response(&e, "Failed to add comment")),
    }
}
