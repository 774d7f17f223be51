use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::PaginationInfo;
use crate::models::problems::entities::Problem;
use crate::models::submissions::responses::SubmissionListItem;

// 学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    pub student: Student,
}

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

// 学生仪表盘：当前可作答的题目 + 自己的提交记录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDashboardResponse {
    pub student: Student,
    pub next_problem: Option<Problem>,
    pub submissions: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
