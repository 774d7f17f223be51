use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;
use crate::models::auth::entities::Gender;

// 教师列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct FacultyListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按教师编号模糊搜索
    pub search: Option<String>,
}

// 新增教师请求（所有字段必填，缺省按空值处理以便统一校验）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct CreateFacultyRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub faculty_code: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub department: String,
}

// 编辑教师请求（密码可选，留空则不修改）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/faculty.ts")]
pub struct UpdateFacultyRequest {
    #[serde(default)]
    pub username: String,
    pub password: Option<String>,
    #[serde(default)]
    pub faculty_code: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub department: String,
}

// 新增教师（存储层使用，已校验并哈希）
#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub username: String,
    pub password_hash: String,
    pub faculty_code: String,
    pub gender: Gender,
    pub department: String,
}

// 教师变更（存储层使用）
#[derive(Debug, Clone)]
pub struct FacultyChanges {
    pub username: String,
    pub password_hash: Option<String>,
    pub faculty_code: String,
    pub gender: Gender,
    pub department: String,
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct FacultyListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
}
