use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, auth::PrincipalResponse};
use crate::services::require_principal;

use super::AuthService;

pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PrincipalResponse { principal },
        "Principal retrieved successfully",
    )))
}
