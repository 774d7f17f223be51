use serde::Deserialize;
use ts_rs::TS;

use crate::models::{FormNumber, PaginationQuery};

// 创建题目请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct CreateProblemRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub total_marks: Option<FormNumber>,
}

// 题目列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct ProblemListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按创建日期（本地时区，YYYY-MM-DD）过滤
    pub date: Option<String>,
}

// 新增题目（存储层使用）
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub title: String,
    pub description: String,
    pub total_marks: i32,
    pub created_by: Option<i64>,
}

// 题目列表查询参数（用于存储层）
//
// `created_range` 为半开区间 [start, end) 的 unix 秒
#[derive(Debug, Clone, Default)]
pub struct ProblemListQuery {
    pub page: u64,
    pub size: u64,
    pub created_range: Option<(i64, i64)>,
}
