use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 表单中的数字字段原始值
///
/// 客户端可能提交 JSON 数字，也可能原样提交输入框中的字符串；
/// 解析延迟到业务层，以便返回字段级的错误信息。
/// 小数、布尔值等其它 JSON 值落入 `Other`，解析时视为无效数字。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub enum FormNumber {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl FormNumber {
    /// 解析为整数（字符串会先去除首尾空白）
    pub fn parse_i64(&self) -> Option<i64> {
        match self {
            FormNumber::Integer(value) => Some(*value),
            FormNumber::Text(raw) => raw.trim().parse::<i64>().ok(),
            FormNumber::Other(_) => None,
        }
    }

    /// 用于表单回显的原始文本
    pub fn raw_text(&self) -> String {
        match self {
            FormNumber::Integer(value) => value.to_string(),
            FormNumber::Text(raw) => raw.clone(),
            FormNumber::Other(value) => value.to_string(),
        }
    }

    /// 是否为空输入
    pub fn is_blank(&self) -> bool {
        matches!(self, FormNumber::Text(raw) if raw.trim().is_empty())
    }
}

impl From<i64> for FormNumber {
    fn from(value: i64) -> Self {
        FormNumber::Integer(value)
    }
}

impl From<&str> for FormNumber {
    fn from(value: &str) -> Self {
        FormNumber::Text(value.to_string())
    }
}
