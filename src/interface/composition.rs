//! 애플리케이션 조립(composition root) 모듈.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::usecases::edit_setting::EditSettingUseCase;
use crate::application::usecases::inspect_settings::InspectSettingsUseCase;
use crate::application::usecases::register_settings::RegisterSettingsUseCase;
use crate::application::usecases::resolve_settings::ResolveSettingsUseCase;
use crate::domain::presets::PresetTable;
use crate::infrastructure::adapters::JsonFileSettingsStore;
use crate::infrastructure::config::settings_path;
use crate::interface::cli::CliOptions;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    store: JsonFileSettingsStore,
    presets: PresetTable,
}

impl AppComposition {
    pub fn new(store: JsonFileSettingsStore, presets: PresetTable) -> Self {
        Self { store, presets }
    }

    /// CLI 옵션으로 저장소를 구성하고 스키마를 등록한다. 프리셋은 항상 내장 테이블이다.
    pub async fn from_options(options: &CliOptions) -> Result<Self> {
        let store = JsonFileSettingsStore::new(settings_path(options.store.as_deref()));

        let composition = Self::new(store, PresetTable::bundled());
        composition
            .register_settings_usecase()
            .execute()
            .await
            .context("failed to register settings")?;
        Ok(composition)
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn register_settings_usecase(&self) -> RegisterSettingsUseCase<'_> {
        RegisterSettingsUseCase { store: &self.store }
    }

    pub fn resolve_settings_usecase(&self) -> ResolveSettingsUseCase<'_> {
        ResolveSettingsUseCase {
            store: &self.store,
            presets: &self.presets,
        }
    }

    pub fn inspect_settings_usecase(&self) -> InspectSettingsUseCase<'_> {
        InspectSettingsUseCase {
            store: &self.store,
            presets: &self.presets,
        }
    }

    pub fn edit_setting_usecase(&self) -> EditSettingUseCase<'_> {
        EditSettingUseCase { store: &self.store }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dropdown::DropdownKind;

    #[tokio::test]
    async fn wires_file_store_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let options = CliOptions {
            store: Some(dir.path().join("settings.json")),
        };
        let app = AppComposition::from_options(&options).await.unwrap();

        app.edit_setting_usecase()
            .execute("instruction", r#"{"Custom":"Do X"}"#)
            .await
            .unwrap();
        app.edit_setting_usecase()
            .execute("openai_api_key", "sk-secret")
            .await
            .unwrap();

        let instruction = app
            .resolve_settings_usecase()
            .resolve_dropdown(DropdownKind::Instruction)
            .await
            .unwrap();
        assert_eq!(&instruction.labels()[..3], &["", "Custom", "Summarize"]);

        let json = app.inspect_settings_usecase().execute().await.unwrap();
        assert!(json.contains("<redacted>"));
        assert!(!json.contains("sk-secret"));
    }

    #[tokio::test]
    async fn every_dropdown_keeps_bundled_presets() {
        let dir = tempfile::tempdir().unwrap();
        let options = CliOptions {
            store: Some(dir.path().join("settings.json")),
        };
        let app = AppComposition::from_options(&options).await.unwrap();
        app.edit_setting_usecase()
            .execute("scope", r#"{"Default":"Do Y"}"#)
            .await
            .unwrap();

        let settings = app.resolve_settings_usecase().execute().await.unwrap();
        let bundled = PresetTable::bundled();
        for (kind, merged) in [
            (DropdownKind::Instruction, &settings.instruction),
            (DropdownKind::Scope, &settings.scope),
            (DropdownKind::Role, &settings.role),
            (DropdownKind::Reasoning, &settings.reasoning),
        ] {
            let presets = bundled.options(kind);
            assert!(!presets.is_empty());
            assert_eq!(&merged.options()[merged.len() - presets.len()..], presets);
        }
        assert_eq!(&settings.scope.labels()[..3], &["", "Default", "Paragraph"]);
    }
}
