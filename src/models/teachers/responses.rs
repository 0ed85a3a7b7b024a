use serde::Serialize;

use super::entities::Teacher;
use crate::models::subjects::entities::Subject;

#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    pub teacher: Teacher,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize)]
pub struct TeacherSubjectsResponse {
    pub teacher_id: i64,
    pub subjects: Vec<Subject>,
}
