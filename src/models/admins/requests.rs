use serde::Deserialize;

// 创建管理员（存储层使用，password 为已哈希的摘要）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub is_staff: bool,
}
