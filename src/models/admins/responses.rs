use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::submissions::responses::SubmissionListItem;

// 管理员仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct AdminDashboardResponse {
    pub student_count: i64,
    pub faculty_count: i64,
    pub problem_count: i64,
    pub submissions: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
