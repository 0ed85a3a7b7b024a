pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Admin, Principal, Role};
pub use requests::{
    ChangePasswordRequest, ConfirmPasswordRequest, DeleteAccountRequest, EditProfileRequest,
    LoginRequest, RegisterRequest,
};
pub use responses::{LoginResponse, PrincipalResponse, RegisterResponse};
