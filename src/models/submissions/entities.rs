use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交实体
//
// `faculty_name` 为评阅时冻结的教师名称，教师被删除后 `faculty_id` 置空但该字段保留。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    pub student_id: i64,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_ref: String,
    pub file_name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub faculty_id: Option<i64>,
    pub faculty_name: Option<String>,
    pub faculty_marks: Option<i32>,
    pub faculty_remarks: Option<String>,
    pub evaluated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Submission {
    /// 是否已评阅过（至少一次）
    pub fn is_evaluated(&self) -> bool {
        self.faculty_marks.is_some()
    }
}
