use serde::Deserialize;
use ts_rs::TS;

// 管理员登录请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

// 教师登录请求（使用教师编号）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct FacultyLoginRequest {
    #[serde(default)]
    pub faculty_code: String,
    #[serde(default)]
    pub password: String,
}

// 学生登录请求（使用学号）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct StudentLoginRequest {
    #[serde(default)]
    pub student_code: String,
    #[serde(default)]
    pub password: String,
}
