//! 저장소에 등록하는 설정 스키마(순수 데이터).
//!
//! 주의: 범위/열거값 검증은 저장소의 `set_value`에서만 사용한다.
//! 설정 해석(resolve)은 저장된 값을 검증 없이 그대로 변환한다.

use serde::Serialize;

use crate::application::error::StoreError;
use crate::domain::settings::{RawValue, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingItemType {
    String,
    Int,
    Bool,
}

impl SettingItemType {
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }

    fn accepts(self, value: &RawValue) -> bool {
        matches!(
            (self, value),
            (Self::String, RawValue::String(_))
                | (Self::Int, RawValue::Int(_))
                | (Self::Bool, RawValue::Bool(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub label: String,
    pub icon_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingSpec {
    pub key: String,
    /// 설정된 적 없을 때의 기본값
    pub value: RawValue,
    #[serde(rename = "type")]
    pub item_type: SettingItemType,
    pub section: String,
    pub public: bool,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
    /// OS 보안 저장소에 둘 값(API 키 등)
    pub secure: bool,
    pub is_enum: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<EnumOption>,
    pub advanced: bool,
}

pub type SettingsSchema = Vec<SettingSpec>;

impl SettingSpec {
    fn new(key: &str, item_type: SettingItemType, value: RawValue, label: &str) -> Self {
        Self {
            key: key.to_string(),
            value,
            item_type,
            section: keys::SECTION.to_string(),
            public: true,
            label: label.to_string(),
            description: None,
            minimum: None,
            maximum: None,
            step: None,
            secure: false,
            is_enum: false,
            options: Vec::new(),
            advanced: false,
        }
    }

    pub fn string(key: &str, default: &str, label: &str) -> Self {
        Self::new(key, SettingItemType::String, RawValue::from(default), label)
    }

    pub fn int(key: &str, default: i64, label: &str) -> Self {
        Self::new(key, SettingItemType::Int, RawValue::Int(default), label)
    }

    pub fn bool(key: &str, default: bool, label: &str) -> Self {
        Self::new(key, SettingItemType::Bool, RawValue::Bool(default), label)
    }

    pub fn range(mut self, minimum: i64, maximum: i64, step: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self.step = Some(step);
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn enum_options(mut self, options: &[&str]) -> Self {
        self.is_enum = true;
        self.options = options
            .iter()
            .map(|v| EnumOption {
                value: v.to_string(),
                label: v.to_string(),
            })
            .collect();
        self
    }

    /// 저장 전 값 검증(타입/범위/열거값).
    pub fn validate(&self, value: &RawValue) -> Result<(), StoreError> {
        if !self.item_type.accepts(value) {
            return Err(StoreError::type_mismatch(
                &self.key,
                self.item_type.name(),
                value,
            ));
        }

        if let Some(v) = value.as_int() {
            if let Some(min) = self.minimum
                && v < min
            {
                return Err(StoreError::invalid(&self.key, format!("{v} is below {min}")));
            }
            if let Some(max) = self.maximum
                && v > max
            {
                return Err(StoreError::invalid(&self.key, format!("{v} is above {max}")));
            }
        }

        if self.is_enum
            && let Some(v) = value.as_str()
            && !self.options.iter().any(|o| o.value == v)
        {
            return Err(StoreError::invalid(
                &self.key,
                format!("{v:?} is not one of the allowed options"),
            ));
        }

        Ok(())
    }
}

pub fn jarvis_section() -> SectionSpec {
    SectionSpec {
        label: "Jarvis".to_string(),
        icon_name: "fas fa-robot".to_string(),
    }
}

/// 등록 순서 그대로의 전체 설정 스키마.
pub fn jarvis_schema() -> SettingsSchema {
    vec![
        SettingSpec::string(keys::OPENAI_API_KEY, "", "OpenAI API Key")
            .describe("Your OpenAI API Key")
            .secure(),
        SettingSpec::string(keys::MODEL, "text-davinci-003", "Model")
            .describe("The model to use for asking Jarvis")
            .enum_options(&[
                "text-davinci-003",
                "text-davinci-002",
                "text-curie-001",
                "text-babbage-001",
                "text-ada-001",
            ]),
        SettingSpec::int(keys::TEMPERATURE, 9, "Temperature")
            .range(0, 10, 1)
            .describe(
                "The temperature of the model. 0 is the least creative. 10 is the most creative. \
                 Higher values produce more creative results, but can also result in more nonsensical text.",
            ),
        SettingSpec::int(keys::MAX_TOKENS, 256, "Max Tokens")
            .range(16, 4096, 16)
            .describe(
                "The maximum number of tokens to generate. Higher values will result in more text, \
                 but can also result in more nonsensical text.",
            ),
        SettingSpec::int(keys::MEMORY_TOKENS, 128, "Memory Tokens")
            .range(16, 4096, 16)
            .describe(
                "The number of tokens to keep in memory when chatting with Jarvis. Higher values will \
                 result in more coherent conversations. Must be lower than max_tokens.",
            ),
        SettingSpec::int(keys::TOP_P, 100, "Top P")
            .range(0, 100, 1)
            .describe(
                "An alternative to sampling with temperature, called nucleus sampling, where the model \
                 considers the results of the tokens with top_p (between 0 and 100) probability mass. \
                 So 10 means only the tokens comprising the top 10% probability mass are considered.",
            ),
        SettingSpec::int(keys::FREQUENCY_PENALTY, 0, "Frequency Penalty")
            .range(-20, 20, 1)
            .describe(
                "A value between -20 and 20. Positive values penalize new tokens based on their existing \
                 frequency in the text so far, decreasing the model's likelihood to repeat the same line verbatim.",
            ),
        SettingSpec::int(keys::PRESENCE_PENALTY, 0, "Presence Penalty")
            .range(-20, 20, 1)
            .describe(
                "A value between -20 and 20. Positive values penalize new tokens based on whether they \
                 appear in the text so far, increasing the model's likelihood to talk about new topics.",
            ),
        SettingSpec::bool(keys::INCLUDE_PROMPT, false, "Include prompt in response"),
        SettingSpec::string(
            keys::CHAT_PREFIX,
            "",
            "Prefix to add to each chat prompt (before the response).",
        )
        .describe(r#"e.g., "\n\nJarvis:""#),
        SettingSpec::string(
            keys::CHAT_SUFFIX,
            "\\n\\nUser: ",
            "Suffix to add to each chat response (after the response).",
        )
        .describe(r#"e.g., "\n\nUser: ""#),
        dropdown_spec(keys::INSTRUCTION, "Instruction", "instruction"),
        dropdown_spec(keys::SCOPE, "Scope", "scope"),
        dropdown_spec(keys::ROLE, "Role", "role"),
        dropdown_spec(keys::REASONING, "Reasoning", "reasoning"),
    ]
}

fn dropdown_spec(key: &str, title: &str, noun: &str) -> SettingSpec {
    SettingSpec::string(key, "", &format!("{title} dropdown options"))
        .describe(&format!(
            "Favorite {noun} prompts to show in dropdown ({{label:prompt, ...}} JSON)."
        ))
        .advanced()
}
