//! 题目存储操作

use super::SeaOrmStorage;
use crate::entity::problems::{ActiveModel, Column, Entity as Problems};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    problems::{
        entities::Problem,
        requests::{NewProblem, ProblemListQuery},
        responses::ProblemListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建题目（创建时间由服务端写入）
    pub async fn create_problem_impl(&self, req: NewProblem) -> Result<Problem> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            total_marks: Set(req.total_marks),
            created_at: Set(now),
            created_by: Set(req.created_by),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_problem())
    }

    /// 通过 ID 获取题目
    pub async fn get_problem_by_id_impl(&self, id: i64) -> Result<Option<Problem>> {
        let result = Problems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_problem()))
    }

    /// 分页列出题目（新建在前）
    pub async fn list_problems_with_pagination_impl(
        &self,
        query: ProblemListQuery,
    ) -> Result<ProblemListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Problems::find();

        // 创建日期筛选
        if let Some((start, end)) = query.created_range {
            select = select
                .filter(Column::CreatedAt.gte(start))
                .filter(Column::CreatedAt.lt(end));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目页数失败: {e}")))?;

        let page = PaginationInfo::clamp_page(page, pages);

        let problems = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(ProblemListResponse {
            items: problems.into_iter().map(|m| m.into_problem()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
            date: None,
        })
    }

    /// 删除题目及其全部提交
    ///
    /// 同一事务内完成，返回被删除提交的文件引用以便事务提交后清理。
    pub async fn delete_problem_impl(&self, id: i64) -> Result<Option<Vec<String>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Problems::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let file_refs: Vec<String> = Submissions::find()
            .filter(SubmissionColumn::ProblemId.eq(id))
            .select_only()
            .column(SubmissionColumn::FileRef)
            .into_tuple::<String>()
            .all(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目提交失败: {e}")))?;

        Submissions::delete_many()
            .filter(SubmissionColumn::ProblemId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除题目提交失败: {e}")))?;

        Problems::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除题目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(file_refs))
    }

    /// 学生尚未提交的最早题目（创建时间升序，同一时间按 ID 升序）
    pub async fn next_available_problem_impl(&self, student_id: i64) -> Result<Option<Problem>> {
        let submitted: Vec<i64> = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .select_only()
            .column(SubmissionColumn::ProblemId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询已提交题目失败: {e}")))?;

        let mut select = Problems::find();
        if !submitted.is_empty() {
            select = select.filter(Column::Id.is_not_in(submitted));
        }

        let result = select
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询可作答题目失败: {e}")))?;

        Ok(result.map(|m| m.into_problem()))
    }

    /// 题目数量
    pub async fn count_problems_impl(&self) -> Result<u64> {
        Problems::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计题目数量失败: {e}")))
    }
}
