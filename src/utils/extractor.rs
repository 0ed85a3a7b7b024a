//! 路径参数安全提取
//!
//! 非法或非正数的 ID 直接返回 400，不进入服务层。

use actix_web::{HttpRequest, HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 定义从路径中按名称提取正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_i64_param(req, $param).map($name),
                )
            }
        }
    };
}

pub fn parse_i64_param(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_request(format!("Missing path parameter: {name}")))?;

    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_request(format!("Invalid path parameter {name}: '{raw}'")))
}

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeTeacherIdI64, "teacherid");
define_safe_i64_extractor!(SafeSubjectIdI64, "subjectid");
