use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use super::requests::EvaluationFormState;
use crate::models::PaginationInfo;
use crate::models::problems::entities::Problem;

/// 提交者信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionStudent {
    pub id: i64,
    pub full_name: String,
    pub student_code: String,
}

/// 提交关联的题目信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionProblem {
    pub id: i64,
    pub title: String,
    pub total_marks: i32,
}

impl From<&Problem> for SubmissionProblem {
    fn from(problem: &Problem) -> Self {
        Self {
            id: problem.id,
            title: problem.title.clone(),
            total_marks: problem.total_marks,
        }
    }
}

/// 提交列表项（包含学生与题目信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: SubmissionStudent,
    pub problem: SubmissionProblem,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

/// 单个提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub submission: SubmissionListItem,
}

/// 评阅失败时的回显：当前提交 + 之前填写的值
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluationErrorResponse {
    pub submission: SubmissionListItem,
    pub form: EvaluationFormState,
}
