//! 문자열 입력을 스키마 타입에 맞게 변환해 저장하는 유스케이스.

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::application::ports::SettingsStore;
use crate::application::schema::{SettingItemType, jarvis_schema};
use crate::domain::settings::{REDACTED, RawValue};

pub struct EditSettingUseCase<'a> {
    pub store: &'a dyn SettingsStore,
}

impl<'a> EditSettingUseCase<'a> {
    /// 저장된 값을 반환한다. 검증은 저장소가 수행한다.
    pub async fn execute(&self, key: &str, input: &str) -> Result<RawValue> {
        let Some(spec) = jarvis_schema().into_iter().find(|s| s.key == key) else {
            bail!("unknown setting: {key}");
        };

        let value = parse_input(spec.item_type, input)
            .with_context(|| format!("invalid input for {key}"))?;
        self.store
            .set_value(key, value.clone())
            .await
            .with_context(|| format!("failed to update {key}"))?;

        if spec.secure {
            info!(key, "updated secure setting");
        } else {
            info!(key, value = %value, "updated setting");
        }
        Ok(value)
    }
}

/// 출력용 표현. secure 설정은 값을 숨긴다.
pub fn display_value(key: &str, value: &RawValue) -> String {
    if jarvis_schema().iter().any(|s| s.key == key && s.secure) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

fn parse_input(item_type: SettingItemType, input: &str) -> Result<RawValue> {
    match item_type {
        SettingItemType::String => Ok(RawValue::from(input)),
        SettingItemType::Int => {
            let trimmed = input.trim();
            let parsed = trimmed
                .parse::<i64>()
                .with_context(|| format!("{trimmed:?} is not an integer"))?;
            Ok(RawValue::Int(parsed))
        }
        SettingItemType::Bool => match input.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(RawValue::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(RawValue::Bool(false)),
            other => bail!("{other:?} is not a boolean"),
        },
    }
}
