use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::College;
use crate::db::types::UserRole;
use crate::repositories::users::{AdminSummary, StudentSummary};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CollegeCreate {
    #[validate(length(min = 1, message = "Please provide a college name."))]
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CollegeResponse {
    pub(crate) id: String,
    pub(crate) name: String,
}

impl CollegeResponse {
    pub(crate) fn from_db(college: College) -> Self {
        Self { id: college.id, name: college.name }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AdminCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub(crate) password: String,
    #[serde(alias = "collegeId")]
    #[validate(length(min = 1, message = "college_id must not be empty"))]
    pub(crate) college_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminCreatedResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) college_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) college_id: String,
    pub(crate) college_name: String,
    pub(crate) created_at: String,
}

impl AdminResponse {
    pub(crate) fn from_db(admin: AdminSummary) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            college_id: admin.college_id,
            college_name: admin.college_name,
            created_at: format_primitive(admin.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) created_at: String,
}

impl StudentResponse {
    pub(crate) fn from_db(student: StudentSummary) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            created_at: format_primitive(student.created_at),
        }
    }
}
