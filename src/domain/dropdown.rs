//! 드롭다운 옵션 병합 규칙.
//!
//! 최종 순서는 항상 `빈 옵션 -> 사용자 옵션 -> 프리셋 옵션` 이다.
//! 같은 라벨이 사용자/프리셋 양쪽에 있어도 중복 제거하지 않는다.
//! 마크업 출력 시 라벨과 값의 `&`, `<`, `>`, `"` 는 HTML 엔티티로 이스케이프한다.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// 병합 대상 드롭다운 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropdownKind {
    Instruction,
    Scope,
    Role,
    Reasoning,
}

impl DropdownKind {
    pub const ALL: [DropdownKind; 4] = [
        DropdownKind::Instruction,
        DropdownKind::Scope,
        DropdownKind::Role,
        DropdownKind::Reasoning,
    ];

    /// 저장소 키이자 프리셋 테이블 키.
    pub fn key(self) -> &'static str {
        match self {
            Self::Instruction => "instruction",
            Self::Scope => "scope",
            Self::Role => "role",
            Self::Reasoning => "reasoning",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "instruction" => Some(Self::Instruction),
            "scope" => Some(Self::Scope),
            "role" => Some(Self::Role),
            "reasoning" => Some(Self::Reasoning),
            _ => None,
        }
    }
}

impl fmt::Display for DropdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// "선택 안 함"을 나타내는 빈 옵션.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    fn render_into(&self, out: &mut String) {
        out.push_str("<option value=\"");
        escape_markup(&self.value, out);
        out.push_str("\">");
        escape_markup(&self.label, out);
        out.push_str("</option>");
    }
}

/// 병합이 끝난 드롭다운 옵션 목록(순서 보존).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropdownOptions(Vec<DropdownOption>);

impl DropdownOptions {
    pub fn options(&self) -> &[DropdownOption] {
        &self.0
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|o| o.label.as_str()).collect()
    }

    /// 라벨이 중복될 수 있으므로 첫 번째(우선순위가 높은) 항목을 반환한다.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `<option value="...">label</option>` 나열 형태의 마크업을 생성한다.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for option in &self.0 {
            option.render_into(&mut out);
        }
        out
    }
}

impl fmt::Display for DropdownOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

impl Serialize for DropdownOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_markup())
    }
}

/// 사용자 드롭다운 JSON이 `{label: prompt}` 객체가 아닐 때의 사유.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedOptions {
    #[error("not valid JSON: {0}")]
    InvalidJson(String),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("value for label {0:?} is not a string")]
    NonStringValue(String),
}

/// 사용자 JSON을 입력 순서대로 옵션 목록으로 파싱한다.
pub fn parse_user_options(raw: &str) -> Result<Vec<DropdownOption>, MalformedOptions> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| MalformedOptions::InvalidJson(e.to_string()))?;
    options_from_json(parsed)
}

fn options_from_json(parsed: Value) -> Result<Vec<DropdownOption>, MalformedOptions> {
    let map = match parsed {
        Value::Object(map) => map,
        other => return Err(MalformedOptions::NotAnObject(json_kind(&other))),
    };

    map.into_iter()
        .map(|(label, value)| match value {
            Value::String(text) => Ok(DropdownOption::new(label, text)),
            _ => Err(MalformedOptions::NonStringValue(label)),
        })
        .collect()
}

/// 빈 옵션 + 사용자 옵션 + 프리셋 옵션 순으로 이어 붙인다.
pub fn merge_dropdown(user: Vec<DropdownOption>, presets: &[DropdownOption]) -> DropdownOptions {
    let mut options = Vec::with_capacity(1 + user.len() + presets.len());
    options.push(DropdownOption::blank());
    options.extend(user);
    options.extend(presets.iter().cloned());
    DropdownOptions(options)
}

/// 파싱 실패를 "사용자 옵션 없음"으로 복구하는 병합 진입점.
pub fn merge_dropdown_raw(user_raw: &str, presets: &[DropdownOption]) -> DropdownOptions {
    merge_dropdown(parse_user_options(user_raw).unwrap_or_default(), presets)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn escape_markup(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
