use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 主体类型：三类身份互相独立，各自持有会话
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum PrincipalKind {
    Admin,
    Faculty,
    Student,
}

impl PrincipalKind {
    pub const ADMIN: &'static str = "admin";
    pub const FACULTY: &'static str = "faculty";
    pub const STUDENT: &'static str = "student";

    pub fn all() -> &'static [PrincipalKind] {
        &[
            PrincipalKind::Admin,
            PrincipalKind::Faculty,
            PrincipalKind::Student,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Admin => Self::ADMIN,
            PrincipalKind::Faculty => Self::FACULTY,
            PrincipalKind::Student => Self::STUDENT,
        }
    }

    /// 未登录时引导客户端前往的登录入口
    pub fn login_path(&self) -> &'static str {
        match self {
            PrincipalKind::Admin => "/api/v1/admin/login",
            PrincipalKind::Faculty => "/api/v1/faculty/login",
            PrincipalKind::Student => "/api/v1/student/login",
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PrincipalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(PrincipalKind::Admin),
            Self::FACULTY => Ok(PrincipalKind::Faculty),
            Self::STUDENT => Ok(PrincipalKind::Student),
            _ => Err(format!("Invalid principal kind: {s}")),
        }
    }
}

/// 单个角色的会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(i64),
}

impl SessionState {
    pub fn principal_id(&self) -> Option<i64> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// 性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Gender>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid gender: '{s}'. Supported: male, female, other"
            ))
        })
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_kind_round_trip() {
        for kind in PrincipalKind::all() {
            assert_eq!(kind.as_str().parse::<PrincipalKind>().unwrap(), *kind);
        }
        assert!("staff".parse::<PrincipalKind>().is_err());
    }

    #[test]
    fn test_session_state() {
        assert_eq!(SessionState::Anonymous.principal_id(), None);
        assert_eq!(SessionState::Authenticated(7).principal_id(), Some(7));
        assert!(!SessionState::Anonymous.is_authenticated());
    }

    #[test]
    fn test_gender_parse_is_case_insensitive() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        let parsed: Gender = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, Gender::Other);
        assert!(serde_json::from_str::<Gender>("\"unknown\"").is_err());
    }
}
