//! 원시 설정값을 읽어 해석 완료 스냅샷을 조립하는 유스케이스.
//!
//! - 필드별 읽기는 서로 독립적이므로 동시에 발행한다.
//! - 저장소 읽기가 하나라도 실패하면 전체 해석이 실패한다(부분 스냅샷 없음).
//! - 사용자 드롭다운 JSON 오류는 여기서 복구하고 호출자에게 노출하지 않는다.

use futures::try_join;
use tracing::{debug, warn};

use crate::application::error::StoreError;
use crate::application::ports::SettingsStore;
use crate::domain::dropdown::{DropdownKind, DropdownOptions, merge_dropdown, parse_user_options};
use crate::domain::presets::PresetTable;
use crate::domain::scale::{self, Scale, unescape_newlines};
use crate::domain::settings::{JarvisSettings, RawValue, keys};

pub struct ResolveSettingsUseCase<'a> {
    pub store: &'a dyn SettingsStore,
    pub presets: &'a PresetTable,
}

impl<'a> ResolveSettingsUseCase<'a> {
    /// 호출마다 새 스냅샷을 만든다.
    pub async fn execute(&self) -> Result<JarvisSettings, StoreError> {
        let (
            openai_api_key,
            model,
            temperature,
            max_tokens,
            memory_tokens,
            top_p,
            frequency_penalty,
            presence_penalty,
            include_prompt,
            instruction,
            scope,
            role,
            reasoning,
            chat_prefix,
            chat_suffix,
        ) = try_join!(
            self.read_string(keys::OPENAI_API_KEY),
            self.read_string(keys::MODEL),
            self.read_scaled(keys::TEMPERATURE, scale::TEMPERATURE),
            self.read_int(keys::MAX_TOKENS),
            self.read_int(keys::MEMORY_TOKENS),
            self.read_scaled(keys::TOP_P, scale::TOP_P),
            self.read_scaled(keys::FREQUENCY_PENALTY, scale::PENALTY),
            self.read_scaled(keys::PRESENCE_PENALTY, scale::PENALTY),
            self.read_bool(keys::INCLUDE_PROMPT),
            self.resolve_dropdown(DropdownKind::Instruction),
            self.resolve_dropdown(DropdownKind::Scope),
            self.resolve_dropdown(DropdownKind::Role),
            self.resolve_dropdown(DropdownKind::Reasoning),
            self.read_chat_text(keys::CHAT_PREFIX),
            self.read_chat_text(keys::CHAT_SUFFIX),
        )?;

        let settings = JarvisSettings {
            openai_api_key,
            model,
            temperature,
            max_tokens,
            memory_tokens,
            top_p,
            frequency_penalty,
            presence_penalty,
            include_prompt,
            instruction,
            scope,
            role,
            reasoning,
            chat_prefix,
            chat_suffix,
        };

        if settings.memory_exceeds_max_tokens() {
            warn!(
                memory_tokens = settings.memory_tokens,
                max_tokens = settings.max_tokens,
                "memory_tokens should be lower than max_tokens"
            );
        }
        debug!(model = %settings.model, "resolved settings");
        Ok(settings)
    }

    /// 드롭다운 하나를 `빈 옵션 + 사용자 옵션 + 프리셋` 으로 병합한다.
    pub async fn resolve_dropdown(&self, kind: DropdownKind) -> Result<DropdownOptions, StoreError> {
        let raw = self.read_string(kind.key()).await?;
        let user = match parse_user_options(&raw) {
            Ok(options) => options,
            Err(reason) => {
                // 빈 값은 "사용자 옵션 없음"의 정상 상태다.
                if !raw.trim().is_empty() {
                    debug!(dropdown = %kind, %reason, "ignoring malformed dropdown options");
                }
                Vec::new()
            }
        };
        Ok(merge_dropdown(user, self.presets.options(kind)))
    }

    async fn read_string(&self, key: &str) -> Result<String, StoreError> {
        match self.store.value(key).await? {
            RawValue::String(v) => Ok(v),
            other => Err(StoreError::type_mismatch(key, "string", &other)),
        }
    }

    async fn read_int(&self, key: &str) -> Result<i64, StoreError> {
        let raw = self.store.value(key).await?;
        raw.as_int()
            .ok_or_else(|| StoreError::type_mismatch(key, "int", &raw))
    }

    async fn read_bool(&self, key: &str) -> Result<bool, StoreError> {
        let raw = self.store.value(key).await?;
        raw.as_bool()
            .ok_or_else(|| StoreError::type_mismatch(key, "bool", &raw))
    }

    async fn read_scaled(&self, key: &str, scale: Scale) -> Result<f64, StoreError> {
        Ok(scale.apply(self.read_int(key).await?))
    }

    async fn read_chat_text(&self, key: &str) -> Result<String, StoreError> {
        Ok(unescape_newlines(&self.read_string(key).await?))
    }
}
