//! 현재 적용될 설정 스냅샷을 확인하는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::SettingsStore;
use crate::application::usecases::resolve_settings::ResolveSettingsUseCase;
use crate::domain::presets::PresetTable;

/// 해석된 스냅샷을 API 키를 가린 JSON으로 반환한다.
pub struct InspectSettingsUseCase<'a> {
    pub store: &'a dyn SettingsStore,
    pub presets: &'a PresetTable,
}

impl<'a> InspectSettingsUseCase<'a> {
    pub async fn execute(&self) -> Result<String> {
        let resolver = ResolveSettingsUseCase {
            store: self.store,
            presets: self.presets,
        };
        let settings = resolver
            .execute()
            .await
            .context("failed to resolve settings")?;
        Ok(serde_json::to_string_pretty(&settings.redacted())?)
    }
}
