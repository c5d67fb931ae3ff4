//! 설정 저장소 오류 분류.

use thiserror::Error;

use crate::domain::settings::RawValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 저장소 미초기화/입출력 실패/손상된 파일
    #[error("settings store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("setting {0:?} is not registered")]
    UnregisteredKey(String),

    /// 저장소가 스키마와 다른 종류의 값을 돌려줌
    #[error("setting {key:?} holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// `set_value` 검증 실패
    #[error("invalid value for setting {key:?}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(key: &str, expected: &'static str, found: &RawValue) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
