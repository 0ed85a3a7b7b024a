use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{DeleteAccountRequest, Role},
};
use crate::services::{error_response, require_principal};

use super::{AuthService, own_account};

pub async fn handle_delete_account(
    service: &AuthService,
    body: DeleteAccountRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let principal = match require_principal(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let (id, _) = match own_account(&storage, &principal, &body.email).await {
        Ok(account) => account,
        Err(resp) => return Ok(resp),
    };

    let deleted = match principal.role {
        Role::Teacher => storage.delete_teacher(id, chrono::Utc::now().timestamp()).await,
        _ => storage.delete_student(id).await,
    };

    match deleted {
        Ok(true) => {
            info!("{} {} deleted own account", principal.role, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "User account deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "User not found"))),
        Err(LinkLearnError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TeacherHasFutureReservations, msg),
        )),
        Err(e) => Ok(error_response(&e, "Failed to delete account")),
    }
}
