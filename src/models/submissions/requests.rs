use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{FormNumber, PaginationQuery};

// 评阅请求：分数保留原始输入，由评阅流程解析
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluateSubmissionRequest {
    pub marks: Option<FormNumber>,
    pub remarks: Option<String>,
}

// 评阅失败时回显的表单值
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluationFormState {
    pub marks: String,
    pub remarks: String,
}

impl From<&EvaluateSubmissionRequest> for EvaluationFormState {
    fn from(req: &EvaluateSubmissionRequest) -> Self {
        let marks = req
            .marks
            .as_ref()
            .map(FormNumber::raw_text)
            .unwrap_or_default();
        Self {
            marks,
            remarks: req.remarks.clone().unwrap_or_default(),
        }
    }
}

// 提交列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按学生姓名或学号模糊搜索
    pub search: Option<String>,
    /// true 仅已评阅，false 仅未评阅
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub graded: Option<bool>,
}

// flatten 之后查询串中的值都以字符串传入，这里同时接受布尔值与 "true"/"false"/"1"/"0"
fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(value)) => Ok(Some(value)),
        Some(Flag::Text(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "Invalid graded flag: {other}"
            ))),
        },
    }
}

// 提交列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: u64,
    pub size: u64,
    pub student_id: Option<i64>,
    pub search: Option<String>,
    pub graded: Option<bool>,
}

// 新增提交（存储层使用）
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub problem_id: i64,
    pub student_id: i64,
    pub file_ref: String,
    pub file_name: String,
}

// 评阅结果（存储层使用）
#[derive(Debug, Clone)]
pub struct EvaluationRecord {
    pub faculty_id: i64,
    pub faculty_name: String,
    pub marks: i32,
    pub remarks: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_list_params_from_query_string() {
        let params = Query::<SubmissionListParams>::from_query("page=2&search=ada&graded=false")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 2);
        assert_eq!(params.graded, Some(false));

        let params = Query::<SubmissionListParams>::from_query("")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.graded, None);
        assert!(Query::<SubmissionListParams>::from_query("graded=maybe").is_err());
    }

    #[test]
    fn test_form_state_echoes_raw_input() {
        let req = EvaluateSubmissionRequest {
            marks: Some(FormNumber::from("abc")),
            remarks: None,
        };
        let form = EvaluationFormState::from(&req);
        assert_eq!(form.marks, "abc");
        assert_eq!(form.remarks, "");
    }
}
