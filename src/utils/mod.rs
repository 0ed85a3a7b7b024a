pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod rating;
pub mod schedule;
pub mod validate;

pub use extractor::{SafeIDI64, SafeSubjectIdI64, SafeTeacherIdI64};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
