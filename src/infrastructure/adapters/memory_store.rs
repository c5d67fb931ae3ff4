//! 프로세스 메모리 기반 설정 저장소(테스트/임베딩용).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::registry::Registry;
use crate::application::error::StoreError;
use crate::application::ports::SettingsStore;
use crate::application::schema::{SectionSpec, SettingsSchema, jarvis_schema, jarvis_section};
use crate::domain::settings::{RawValue, keys};

#[derive(Default)]
struct MemoryState {
    registry: Registry,
    values: HashMap<String, RawValue>,
}

#[derive(Default)]
pub struct InMemorySettingsStore {
    state: RwLock<MemoryState>,
}

impl InMemorySettingsStore {
    /// 아무 것도 등록되지 않은 저장소.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jarvis 섹션/스키마가 이미 등록된 저장소.
    pub fn with_jarvis_schema() -> Self {
        let mut state = MemoryState::default();
        state
            .registry
            .register_section(keys::SECTION, jarvis_section());
        state.registry.register_settings(jarvis_schema());
        Self {
            state: RwLock::new(state),
        }
    }

    /// 스키마 검증 없이 값을 넣는다. 호스트가 이미 저장해 둔 값을 흉내 낼 때 쓴다.
    pub fn insert_unchecked(&self, key: &str, value: RawValue) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.state
            .read()
            .map(|s| s.registry.has_section(name))
            .unwrap_or(false)
    }
}

fn poisoned() -> StoreError {
    StoreError::unavailable("in-memory settings lock poisoned")
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn value(&self, key: &str) -> Result<RawValue, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let spec = state.registry.spec(key)?;
        Ok(state
            .values
            .get(key)
            .cloned()
            .unwrap_or_else(|| spec.value.clone()))
    }

    async fn set_value(&self, key: &str, value: RawValue) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.registry.spec(key)?.validate(&value)?;
        state.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn register_section(&self, name: &str, section: SectionSpec) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.registry.register_section(name, section);
        Ok(())
    }

    async fn register_settings(&self, schema: SettingsSchema) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state.registry.register_settings(schema);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::register_settings::RegisterSettingsUseCase;

    #[tokio::test]
    async fn unset_keys_return_registered_default() {
        let store = InMemorySettingsStore::with_jarvis_schema();
        assert_eq!(store.value(keys::MAX_TOKENS).await.unwrap(), RawValue::Int(256));
        assert_eq!(
            store.value(keys::MODEL).await.unwrap(),
            RawValue::from("text-davinci-003")
        );
    }

    #[tokio::test]
    async fn reading_before_registration_fails() {
        let store = InMemorySettingsStore::new();
        assert_eq!(
            store.value(keys::TEMPERATURE).await,
            Err(StoreError::UnregisteredKey(keys::TEMPERATURE.to_string()))
        );
    }

    #[tokio::test]
    async fn register_usecase_populates_section_and_schema() {
        let store = InMemorySettingsStore::new();
        RegisterSettingsUseCase { store: &store }
            .execute()
            .await
            .unwrap();

        assert!(store.has_section(keys::SECTION));
        assert_eq!(store.value(keys::TEMPERATURE).await.unwrap(), RawValue::Int(9));
    }

    #[tokio::test]
    async fn set_value_validates_before_storing() {
        let store = InMemorySettingsStore::with_jarvis_schema();
        store
            .set_value(keys::PRESENCE_PENALTY, RawValue::Int(-20))
            .await
            .unwrap();
        assert!(
            store
                .set_value(keys::PRESENCE_PENALTY, RawValue::Int(-21))
                .await
                .is_err()
        );
        assert!(
            store
                .set_value(keys::INCLUDE_PROMPT, RawValue::Int(1))
                .await
                .is_err()
        );
        assert_eq!(
            store.value(keys::PRESENCE_PENALTY).await.unwrap(),
            RawValue::Int(-20)
        );
    }

    #[test]
    fn insert_reports_poisoned_lock() {
        let store = InMemorySettingsStore::with_jarvis_schema();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.state.write().unwrap();
            panic!("poison the lock");
        }));

        assert!(matches!(
            store.insert_unchecked(keys::MODEL, RawValue::from("text-ada-001")),
            Err(StoreError::Unavailable { .. })
        ));
    }
}
