use std::sync::Arc;

use crate::models::{
    admins::{entities::Admin, requests::CreateAdminRequest},
    faculties::{
        entities::Faculty,
        requests::{FacultyChanges, FacultyListQuery, NewFaculty},
        responses::FacultyListResponse,
    },
    problems::{
        entities::Problem,
        requests::{NewProblem, ProblemListQuery},
        responses::ProblemListResponse,
    },
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery},
        responses::StudentListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{EvaluationRecord, NewSubmission, SubmissionListQuery},
        responses::{SubmissionListItem, SubmissionListResponse},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 管理员方法
    // 创建管理员
    async fn create_admin(&self, admin: CreateAdminRequest) -> Result<Admin>;
    // 通过ID获取管理员
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    // 通过用户名获取管理员
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>>;
    // 管理员数量
    async fn count_admins(&self) -> Result<u64>;
    // 更新管理员最后登录时间
    async fn update_admin_last_login(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    // 创建教师
    async fn create_faculty(&self, faculty: NewFaculty) -> Result<Faculty>;
    // 通过ID获取教师
    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>>;
    // 通过教师编号获取教师
    async fn get_faculty_by_code(&self, faculty_code: &str) -> Result<Option<Faculty>>;
    // 教师编号是否已被占用（可排除自身）
    async fn faculty_code_exists(&self, faculty_code: &str, exclude_id: Option<i64>)
    -> Result<bool>;
    // 教师用户名是否已被占用（可排除自身）
    async fn faculty_username_exists(&self, username: &str, exclude_id: Option<i64>)
    -> Result<bool>;
    // 列出教师
    async fn list_faculties_with_pagination(
        &self,
        query: FacultyListQuery,
    ) -> Result<FacultyListResponse>;
    // 更新教师信息
    async fn update_faculty(&self, id: i64, changes: FacultyChanges) -> Result<Option<Faculty>>;
    // 删除教师（评阅记录保留教师名称快照）
    async fn delete_faculty(&self, id: i64) -> Result<bool>;
    // 教师数量
    async fn count_faculties(&self) -> Result<u64>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生
    async fn get_student_by_code(&self, student_code: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 覆盖学生密码摘要
    async fn update_student_password(&self, id: i64, password_hash: String) -> Result<bool>;
    // 学生数量
    async fn count_students(&self) -> Result<u64>;

    /// 题目管理方法
    // 创建题目
    async fn create_problem(&self, problem: NewProblem) -> Result<Problem>;
    // 通过ID获取题目
    async fn get_problem_by_id(&self, id: i64) -> Result<Option<Problem>>;
    // 列出题目（新建在前）
    async fn list_problems_with_pagination(
        &self,
        query: ProblemListQuery,
    ) -> Result<ProblemListResponse>;
    // 删除题目及其提交，返回被删除提交的文件引用；题目不存在时返回 None
    async fn delete_problem(&self, id: i64) -> Result<Option<Vec<String>>>;
    // 学生尚未提交的最早题目
    async fn next_available_problem(&self, student_id: i64) -> Result<Option<Problem>>;
    // 题目数量
    async fn count_problems(&self) -> Result<u64>;

    /// 提交管理方法
    // 学生是否已提交该题
    async fn submission_exists(&self, student_id: i64, problem_id: i64) -> Result<bool>;
    // 创建提交（同一学生同一题目冲突时返回 AlreadySubmitted）
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 通过ID获取提交（附带学生与题目信息）
    async fn get_submission_item(&self, id: i64) -> Result<Option<SubmissionListItem>>;
    // 列出提交（最新在前）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 写入评阅结果（单行更新，后写覆盖）
    async fn evaluate_submission(
        &self,
        id: i64,
        record: EvaluationRecord,
    ) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
