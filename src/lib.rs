//! jarvis-settings library root.
//! 노트 앱 AI 어시스턴트(Jarvis) 설정을 해석하는 계층을 외부에 노출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::error::StoreError;
use application::ports::SettingsStore;
use application::usecases::resolve_settings::ResolveSettingsUseCase;
use domain::presets::PresetTable;
use domain::settings::JarvisSettings;

/// 번들 프리셋으로 주어진 저장소의 설정 스냅샷을 해석한다.
pub async fn resolve(store: &dyn SettingsStore) -> Result<JarvisSettings, StoreError> {
    let presets = PresetTable::bundled();
    ResolveSettingsUseCase {
        store,
        presets: &presets,
    }
    .execute()
    .await
}
