//! 섹션/설정 스키마를 저장소에 등록하는 유스케이스.

use tracing::debug;

use crate::application::error::StoreError;
use crate::application::ports::SettingsStore;
use crate::application::schema::{jarvis_schema, jarvis_section};
use crate::domain::settings::keys;

/// 최초 1회 선언적 스키마를 등록한다. 해석 경로에는 포함되지 않는다.
pub struct RegisterSettingsUseCase<'a> {
    pub store: &'a dyn SettingsStore,
}

impl<'a> RegisterSettingsUseCase<'a> {
    pub async fn execute(&self) -> Result<(), StoreError> {
        self.store
            .register_section(keys::SECTION, jarvis_section())
            .await?;

        let schema = jarvis_schema();
        debug!(count = schema.len(), "registering jarvis settings");
        self.store.register_settings(schema).await
    }
}
