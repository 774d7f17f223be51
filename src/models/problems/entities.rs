use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目实体（创建后除删除外不可修改）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/problem.ts")]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub total_marks: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<i64>,
}
