use serde::Deserialize;
use ts_rs::TS;

use crate::models::auth::entities::Gender;
use crate::models::{FormNumber, PaginationQuery};

// 学生注册请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RegisterStudentRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub student_code: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub gender: String,
    pub year: Option<FormNumber>,
    pub semester: Option<FormNumber>,
    #[serde(default)]
    pub department: String,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按姓名或学号模糊搜索
    pub q: Option<String>,
}

// 管理员重置学生密码
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ResetStudentPasswordRequest {
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// 学生自助修改密码
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

// 新增学生（存储层使用，已校验并哈希）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub student_code: String,
    pub password_hash: String,
    pub gender: Gender,
    pub year: i32,
    pub semester: i32,
    pub department: String,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
}
