//! 提交存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::problems::{Column as ProblemColumn, Entity as Problems};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model, Relation};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::{EvaluationRecord, NewSubmission, SubmissionListQuery},
        responses::{
            SubmissionListItem, SubmissionListResponse, SubmissionProblem, SubmissionStudent,
        },
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 学生是否已提交该题
    pub async fn submission_exists_impl(&self, student_id: i64, problem_id: i64) -> Result<bool> {
        let count = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ProblemId.eq(problem_id))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(count > 0)
    }

    /// 创建提交
    ///
    /// (student_id, problem_id) 上的唯一索引是最终裁决，并发冲突映射为 AlreadySubmitted。
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            problem_id: Set(req.problem_id),
            student_id: Set(req.student_id),
            file_ref: Set(req.file_ref),
            file_name: Set(req.file_name),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if super::is_unique_violation(&e) {
                PortalError::already_submitted(
                    "You have already submitted a solution for this problem.",
                )
            } else {
                PortalError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 ID 获取提交（附带学生与题目）
    pub async fn get_submission_item_impl(&self, id: i64) -> Result<Option<SubmissionListItem>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        match result {
            Some(model) => Ok(self.assemble_items(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出提交（最新在前）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Submissions::find();

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 评阅状态筛选
        match query.graded {
            Some(true) => select = select.filter(Column::FacultyMarks.is_not_null()),
            Some(false) => select = select.filter(Column::FacultyMarks.is_null()),
            None => {}
        }

        // 按学生姓名或学号搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select
                .join(JoinType::InnerJoin, Relation::Student.def())
                .filter(
                    Condition::any()
                        .add(StudentColumn::FullName.like(like_contains(pattern)))
                        .add(StudentColumn::StudentCode.like(like_contains(pattern))),
                );
        }

        // 排序
        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交页数失败: {e}")))?;

        let page = PaginationInfo::clamp_page(page, pages);

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: self.assemble_items(submissions).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 写入评阅结果
    pub async fn evaluate_submission_impl(
        &self,
        id: i64,
        record: EvaluationRecord,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            faculty_id: Set(Some(record.faculty_id)),
            faculty_name: Set(Some(record.faculty_name)),
            faculty_marks: Set(Some(record.marks)),
            faculty_remarks: Set(Some(record.remarks)),
            evaluated_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("保存评阅结果失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 批量补全学生与题目信息
    async fn assemble_items(&self, submissions: Vec<Model>) -> Result<Vec<SubmissionListItem>> {
        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let problem_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.problem_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let students: HashMap<i64, _> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生信息失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let problems: HashMap<i64, _> = Problems::find()
            .filter(ProblemColumn::Id.is_in(problem_ids))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询题目信息失败: {e}")))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let items = submissions
            .into_iter()
            .map(|s| {
                let student = students.get(&s.student_id);
                let problem = problems.get(&s.problem_id);
                SubmissionListItem {
                    student: SubmissionStudent {
                        id: s.student_id,
                        full_name: student
                            .map(|st| st.full_name.clone())
                            .unwrap_or_else(|| "Unknown".to_string()),
                        student_code: student
                            .map(|st| st.student_code.clone())
                            .unwrap_or_default(),
                    },
                    problem: SubmissionProblem {
                        id: s.problem_id,
                        title: problem
                            .map(|p| p.title.clone())
                            .unwrap_or_else(|| "Unknown".to_string()),
                        total_marks: problem.map(|p| p.total_marks).unwrap_or_default(),
                    },
                    submission: s.into_submission(),
                }
            })
            .collect();

        Ok(items)
    }
}
