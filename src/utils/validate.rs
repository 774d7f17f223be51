use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AppConfig;
use crate::errors::PortalError;

/// 学号 / 教师编号：调用方已去除首尾空白，非空、不含控制字符、最长 50 个字符
static IDENTIFIER_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Cc}]{1,50}$").expect("Invalid identifier code regex"));

/// 必填字段校验：任一字段去除空白后为空即失败
pub fn require_fields(fields: &[&str], message: &str) -> Result<(), PortalError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(PortalError::validation(message));
    }
    Ok(())
}

pub fn validate_student_code(code: &str) -> Result<(), &'static str> {
    if !IDENTIFIER_CODE_RE.is_match(code) {
        return Err("Student ID must be 1-50 characters without control characters");
    }
    Ok(())
}

pub fn validate_faculty_code(code: &str) -> Result<(), &'static str> {
    if !IDENTIFIER_CODE_RE.is_match(code) {
        return Err("Faculty ID must be 1-50 characters without control characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 新密码校验：空密码总是拒绝，强度策略按配置启用
pub fn check_new_password(password: &str) -> Result<(), PortalError> {
    if password.is_empty() {
        return Err(PortalError::validation("Password cannot be empty."));
    }
    if AppConfig::get().identity.enforce_password_policy {
        let result = validate_password(password);
        if !result.is_valid {
            return Err(PortalError::validation(result.error_message()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields() {
        assert!(require_fields(&["a", "b"], "All fields are required.").is_ok());
        let err = require_fields(&["a", "  "], "All fields are required.").unwrap_err();
        assert_eq!(err.message(), "All fields are required.");
    }

    #[test]
    fn test_identifier_codes() {
        assert!(validate_student_code("CS2024-017").is_ok());
        assert!(validate_faculty_code("FAC/09").is_ok());
        assert!(validate_student_code("-leading").is_ok());
        assert!(validate_student_code("CS 2024 017").is_ok());
        assert!(validate_faculty_code("Dr. Müller #2").is_ok());
        assert!(validate_faculty_code(&"ü".repeat(50)).is_ok());
        assert!(validate_faculty_code(&"x".repeat(51)).is_err());
        assert!(validate_student_code("").is_err());
        assert!(validate_student_code("tab\there").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);
        let short = validate_password("Ab1");
        assert!(
            short
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        let common = validate_password("Password1");
        assert!(
            common
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_check_new_password_default_policy_off() {
        assert!(check_new_password("weak").is_ok());
        assert!(check_new_password("").is_err());
    }
}
