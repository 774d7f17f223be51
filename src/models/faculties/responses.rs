use serde::Serialize;
use ts_rs::TS;

use super::entities::Faculty;
use crate::models::PaginationInfo;
use crate::models::submissions::responses::SubmissionListItem;

// 教师响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyResponse {
    pub faculty: Faculty,
}

// 教师列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyListResponse {
    pub items: Vec<Faculty>,
    pub pagination: PaginationInfo,
}

// 教师仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyDashboardResponse {
    pub faculty_username: String,
    pub search: String,
    pub submissions: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
