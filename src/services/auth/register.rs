use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::LinkLearnError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{RegisterRequest, RegisterResponse, Role},
    students::requests::CreateStudentRequest,
    teachers::requests::CreateTeacherRequest,
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只允许学生与教师自助注册
    if register_request.role == Role::Admin {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RoleInvalid,
            "Role must be STUDENT or TEACHER",
        )));
    }

    let email = register_request.email.trim().to_lowercase();
    let first_name = register_request.firstname.trim().to_string();
    let last_name = register_request.lastname.trim().to_string();

    // 1. 校验字段
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EmailInvalid, msg)));
    }
    if let Err(msg) = validate_name(&first_name).and_then(|_| validate_name(&last_name)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    // 2. 同一角色下邮箱唯一
    if let Err(response) = check_email_exists(&storage, register_request.role, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed",
                )),
            );
        }
    };

    // 4. 创建账号
    let created = match register_request.role {
        Role::Teacher => storage
            .create_teacher(
                CreateTeacherRequest {
                    first_name,
                    last_name,
                    email,
                    password_hash,
                },
                register_request.subjects,
            )
            .await
            .map(|t| RegisterResponse {
                id: t.id,
                firstname: t.first_name,
                lastname: t.last_name,
                email: t.email,
                role: Role::Teacher,
            }),
        _ => storage
            .create_student(CreateStudentRequest {
                first_name,
                last_name,
                email,
                password_hash,
            })
            .await
            .map(|s| RegisterResponse {
                id: s.id,
                firstname: s.first_name,
                lastname: s.last_name,
                email: s.email,
                role: Role::Student,
            }),
    };

    match created {
        Ok(account) => {
            info!("{} {} registered", account.role, account.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                account,
                "Registration successful",
            )))
        }
        Err(LinkLearnError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, "Email already registered"),
        )),
        Err(LinkLearnError::NotFound(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectNotFound, msg))),
        Err(e) => {
            error!("Registration failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed",
                )),
            )
        }
    }
}

async fn check_email_exists(
    storage: &Arc<dyn Storage>,
    role: Role,
    email: &str,
) -> Result<(), HttpResponse> {
    let existing = match role {
        Role::Teacher => storage.get_teacher_by_email(email).await.map(|t| t.is_some()),
        _ => storage.get_student_by_email(email).await.map(|s| s.is_some()),
    };

    match existing {
        Ok(true) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EmailAlreadyExists,
            "Email already registered",
        ))),
        Ok(false) => Ok(()),
        Err(e) => {
            error!("Failed to check email: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed",
                )),
            )
        }
    }
}
