use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::auth::entities::Gender;

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub student_code: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub gender: Gender,
    pub year: i32,
    pub semester: i32,
    pub department: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
