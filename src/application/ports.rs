//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use async_trait::async_trait;

use crate::application::error::StoreError;
use crate::application::schema::{SectionSpec, SettingsSchema};
use crate::domain::settings::RawValue;

/// 호스트 설정 저장소 포트.
/// 값이 설정된 적 없으면 등록된 기본값을 돌려준다.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn value(&self, key: &str) -> Result<RawValue, StoreError>;
    async fn set_value(&self, key: &str, value: RawValue) -> Result<(), StoreError>;
    async fn register_section(&self, name: &str, section: SectionSpec) -> Result<(), StoreError>;
    async fn register_settings(&self, schema: SettingsSchema) -> Result<(), StoreError>;
}
