//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub faculty_code: String,
    pub gender: String,
    pub department: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_faculty(self) -> crate::models::faculties::entities::Faculty {
        use crate::models::auth::entities::Gender;
        use crate::models::faculties::entities::Faculty;

        Faculty {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            faculty_code: self.faculty_code,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            department: self.department,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
