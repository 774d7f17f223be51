use serde::Serialize;
use ts_rs::TS;

use super::entities::Problem;
use crate::models::PaginationInfo;

// 题目响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct ProblemResponse {
    pub problem: Problem,
}

// 题目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct ProblemListResponse {
    pub items: Vec<Problem>,
    pub pagination: PaginationInfo,
    pub date: Option<String>,
}

// 删除题目的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct ProblemDeleteResponse {
    pub id: i64,
    pub removed_submissions: u64,
}
