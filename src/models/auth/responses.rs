use serde::Serialize;

use super::entities::{Principal, Role};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub role: Role,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub principal: Principal,
}
