//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub student_code: String,
    pub password_hash: String,
    pub gender: String,
    pub year: i32,
    pub semester: i32,
    pub department: String,
    pub created_at: i64,
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
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::auth::entities::Gender;
        use crate::models::students::entities::Student;

        Student {
            id: self.id,
            full_name: self.full_name,
            student_code: self.student_code,
            password_hash: self.password_hash,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            year: self.year,
            semester: self.semester,
            department: self.department,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
