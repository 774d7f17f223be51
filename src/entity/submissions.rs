//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub problem_id: i64,
    pub student_id: i64,
    pub file_ref: String,
    pub file_name: String,
    pub submitted_at: i64,
    pub faculty_id: Option<i64>,
    pub faculty_name: Option<String>,
    pub faculty_marks: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub faculty_remarks: Option<String>,
    pub evaluated_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::problems::Entity",
        from = "Column::ProblemId",
        to = "super::problems::Column::Id"
    )]
    Problem,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::faculties::Entity",
        from = "Column::FacultyId",
        to = "super::faculties::Column::Id"
    )]
    Evaluator,
}

impl Related<super::problems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problem.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::faculties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;

        Submission {
            id: self.id,
            problem_id: self.problem_id,
            student_id: self.student_id,
            file_ref: self.file_ref,
            file_name: self.file_name,
            submitted_at: super::from_timestamp(self.submitted_at),
            faculty_id: self.faculty_id,
            faculty_name: self.faculty_name,
            faculty_marks: self.faculty_marks,
            faculty_remarks: self.faculty_remarks,
            evaluated_at: self.evaluated_at.map(super::from_timestamp),
        }
    }
}
