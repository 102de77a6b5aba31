use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "userrole", rename_all = "lowercase")]
pub(crate) enum UserRole {
    Master,
    Admin,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "userstatus", rename_all = "lowercase")]
pub(crate) enum UserStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "questiontype", rename_all = "lowercase")]
pub(crate) enum QuestionType {
    Mcq,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "codelanguage", rename_all = "lowercase")]
pub(crate) enum CodeLanguage {
    Python3,
    Javascript,
    Java,
    Cpp17,
}

impl CodeLanguage {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Python3 => "python3",
            Self::Javascript => "javascript",
            Self::Java => "java",
            Self::Cpp17 => "cpp17",
        }
    }

    /// Case-insensitive lookup used for loosely typed import rows.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "python3" | "python" => Some(Self::Python3),
            "javascript" | "js" | "nodejs" => Some(Self::Javascript),
            "java" => Some(Self::Java),
            "cpp17" | "cpp" | "c++" => Some(Self::Cpp17),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "sessionstatus", rename_all = "lowercase")]
pub(crate) enum SessionStatus {
    Scheduled,
    Inprogress,
    Completed,
}

impl SessionStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Inprogress => "inprogress",
            Self::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_language_parse_accepts_aliases() {
        assert_eq!(CodeLanguage::parse(" Python "), Some(CodeLanguage::Python3));
        assert_eq!(CodeLanguage::parse("C++"), Some(CodeLanguage::Cpp17));
        assert_eq!(CodeLanguage::parse("nodejs"), Some(CodeLanguage::Javascript));
        assert_eq!(CodeLanguage::parse("rust"), None);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_value(SessionStatus::Inprogress).unwrap(), "inprogress");
        assert_eq!(serde_json::to_value(CodeLanguage::Cpp17).unwrap(), "cpp17");
        assert_eq!(serde_json::to_value(UserRole::Master).unwrap(), "master");
    }
}
