//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::faculties::{ActiveModel, Column, Entity as Faculties};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    faculties::{
        entities::Faculty,
        requests::{FacultyChanges, FacultyListQuery, NewFaculty},
        responses::FacultyListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_faculty_impl(&self, req: NewFaculty) -> Result<Faculty> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password_hash),
            faculty_code: Set(req.faculty_code),
            gender: Set(req.gender.to_string()),
            department: Set(req.department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if super::is_unique_violation(&e) {
                PortalError::duplicate_identifier("Faculty ID already exists.")
            } else {
                PortalError::database_operation(format!("创建教师失败: {e}"))
            }
        })?;

        Ok(result.into_faculty())
    }

    /// 通过 ID 获取教师
    pub async fn get_faculty_by_id_impl(&self, id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    /// 通过教师编号获取教师
    pub async fn get_faculty_by_code_impl(&self, faculty_code: &str) -> Result<Option<Faculty>> {
        let result = Faculties::find()
            .filter(Column::FacultyCode.eq(faculty_code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    /// 教师编号是否已被占用
    pub async fn faculty_code_exists_impl(
        &self,
        faculty_code: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Faculties::find().filter(Column::FacultyCode.eq(faculty_code));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师编号失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师用户名是否已被占用
    pub async fn faculty_username_exists_impl(
        &self,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Faculties::find().filter(Column::Username.eq(username));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师用户名失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出教师
    pub async fn list_faculties_with_pagination_impl(
        &self,
        query: FacultyListQuery,
    ) -> Result<FacultyListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Faculties::find();

        // 按教师编号搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::FacultyCode.like(like_contains(search.trim())));
        }

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师页数失败: {e}")))?;

        let page = PaginationInfo::clamp_page(page, pages);

        let faculties = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(FacultyListResponse {
            items: faculties.into_iter().map(|m| m.into_faculty()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新教师信息（密码为空时保留原摘要）
    pub async fn update_faculty_impl(
        &self,
        id: i64,
        changes: FacultyChanges,
    ) -> Result<Option<Faculty>> {
        // 先检查教师是否存在
        if self.get_faculty_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            username: Set(changes.username),
            faculty_code: Set(changes.faculty_code),
            gender: Set(changes.gender.to_string()),
            department: Set(changes.department),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }

        let result = model.update(&self.db).await.map_err(|e| {
            if super::is_unique_violation(&e) {
                PortalError::duplicate_identifier("Faculty ID already exists.")
            } else {
                PortalError::database_operation(format!("更新教师失败: {e}"))
            }
        })?;

        Ok(Some(result.into_faculty()))
    }

    /// 删除教师
    ///
    /// 同一事务内先解除其评阅记录的引用（`faculty_name` 快照保留），再删除教师。
    pub async fn delete_faculty_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::update_many()
            .col_expr(SubmissionColumn::FacultyId, Expr::value(Option::<i64>::None))
            .filter(SubmissionColumn::FacultyId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("解除评阅引用失败: {e}")))?;

        let result = Faculties::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教师数量
    pub async fn count_faculties_impl(&self) -> Result<u64> {
        Faculties::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计教师数量失败: {e}")))
    }
}
