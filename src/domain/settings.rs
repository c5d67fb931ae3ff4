//! 설정 스냅샷 엔티티와 원시 설정값 값 객체.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dropdown::DropdownOptions;

/// 저장소 키 상수.
pub mod keys {
    pub const SECTION: &str = "jarvis";

    pub const OPENAI_API_KEY: &str = "openai_api_key";
    pub const MODEL: &str = "model";
    pub const TEMPERATURE: &str = "temp";
    pub const MAX_TOKENS: &str = "max_tokens";
    pub const MEMORY_TOKENS: &str = "memory_tokens";
    pub const TOP_P: &str = "top_p";
    pub const FREQUENCY_PENALTY: &str = "frequency_penalty";
    pub const PRESENCE_PENALTY: &str = "presence_penalty";
    pub const INCLUDE_PROMPT: &str = "include_prompt";
    pub const CHAT_PREFIX: &str = "chat_prefix";
    pub const CHAT_SUFFIX: &str = "chat_suffix";
    pub const INSTRUCTION: &str = "instruction";
    pub const SCOPE: &str = "scope";
    pub const ROLE: &str = "role";
    pub const REASONING: &str = "reasoning";
}

/// 저장소에 영속된 변환 전 값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl RawValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// 요청 단위로 새로 만들어지는 해석 완료 설정 스냅샷.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JarvisSettings {
    pub openai_api_key: String,
    pub model: String,
    /// 0.0..=1.0
    pub temperature: f64,
    pub max_tokens: i64,
    /// `max_tokens`보다 작아야 하지만 강제하지 않는다.
    pub memory_tokens: i64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub include_prompt: bool,
    pub instruction: DropdownOptions,
    pub scope: DropdownOptions,
    pub role: DropdownOptions,
    pub reasoning: DropdownOptions,
    pub chat_prefix: String,
    pub chat_suffix: String,
}

pub const REDACTED: &str = "<redacted>";

impl JarvisSettings {
    pub fn memory_exceeds_max_tokens(&self) -> bool {
        self.memory_tokens > self.max_tokens
    }

    /// 출력/진단용 사본. API 키가 설정되어 있으면 가린다.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.openai_api_key.is_empty() {
            copy.openai_api_key = REDACTED.to_string();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_deserializes_by_json_kind() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[true, 16, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![RawValue::Bool(true), RawValue::Int(16), RawValue::from("x")]
        );
    }

    #[test]
    fn raw_value_accessors_match_variant() {
        assert_eq!(RawValue::Int(-3).as_int(), Some(-3));
        assert_eq!(RawValue::Int(-3).as_str(), None);
        assert_eq!(RawValue::Bool(true).as_bool(), Some(true));
        assert_eq!(RawValue::from("a").kind(), "string");
    }
}
