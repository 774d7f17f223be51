//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admins;
mod faculties;
mod problems;
mod students;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;
        let storage = Self::connect(&db_url, config.database.pool_size).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 连接数据库并运行迁移
    ///
    /// 内存 SQLite（`sqlite::memory:`）每个连接都是独立的库，此时应使用单连接。
    pub async fn connect(db_url: &str, pool_size: u32) -> Result<Self> {
        let timeout = AppConfig::get().database.timeout;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 是否为唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 管理员模块
    async fn create_admin(&self, admin: CreateAdminRequest) -> Result<Admin> {
        self.create_admin_impl(admin).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.get_admin_by_username_impl(username).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn update_admin_last_login(&self, id: i64) -> Result<bool> {
        self.update_admin_last_login_impl(id).await
    }

    // 教师模块
    async fn create_faculty(&self, faculty: NewFaculty) -> Result<Faculty> {
        self.create_faculty_impl(faculty).await
    }

    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_by_id_impl(id).await
    }

    async fn get_faculty_by_code(&self, faculty_code: &str) -> Result<Option<Faculty>> {
        self.get_faculty_by_code_impl(faculty_code).await
    }

    async fn faculty_code_exists(
        &self,
        faculty_code: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.faculty_code_exists_impl(faculty_code, exclude_id)
            .await
    }

    async fn faculty_username_exists(
        &self,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.faculty_username_exists_impl(username, exclude_id)
            .await
    }

    async fn list_faculties_with_pagination(
        &self,
        query: FacultyListQuery,
    ) -> Result<FacultyListResponse> {
        self.list_faculties_with_pagination_impl(query).await
    }

    async fn update_faculty(&self, id: i64, changes: FacultyChanges) -> Result<Option<Faculty>> {
        self.update_faculty_impl(id, changes).await
    }

    async fn delete_faculty(&self, id: i64) -> Result<bool> {
        self.delete_faculty_impl(id).await
    }

    async fn count_faculties(&self) -> Result<u64> {
        self.count_faculties_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_code(&self, student_code: &str) -> Result<Option<Student>> {
        self.get_student_by_code_impl(student_code).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student_password(&self, id: i64, password_hash: String) -> Result<bool> {
        self.update_student_password_impl(id, password_hash).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 题目模块
    async fn create_problem(&self, problem: NewProblem) -> Result<Problem> {
        self.create_problem_impl(problem).await
    }

    async fn get_problem_by_id(&self, id: i64) -> Result<Option<Problem>> {
        self.get_problem_by_id_impl(id).await
    }

    async fn list_problems_with_pagination(
        &self,
        query: ProblemListQuery,
    ) -> Result<ProblemListResponse> {
        self.list_problems_with_pagination_impl(query).await
    }

    async fn delete_problem(&self, id: i64) -> Result<Option<Vec<String>>> {
        self.delete_problem_impl(id).await
    }

    async fn next_available_problem(&self, student_id: i64) -> Result<Option<Problem>> {
        self.next_available_problem_impl(student_id).await
    }

    async fn count_problems(&self) -> Result<u64> {
        self.count_problems_impl().await
    }

    // 提交模块
    async fn submission_exists(&self, student_id: i64, problem_id: i64) -> Result<bool> {
        self.submission_exists_impl(student_id, problem_id).await
    }

    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_item(&self, id: i64) -> Result<Option<SubmissionListItem>> {
        self.get_submission_item_impl(id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn evaluate_submission(
        &self,
        id: i64,
        record: EvaluationRecord,
    ) -> Result<Option<Submission>> {
        self.evaluate_submission_impl(id, record).await
    }
}
