//! JSON 파일 기반 설정 저장소 어댑터.
//!
//! - 파일에는 사용자가 바꾼 값만 저장한다. 없는 키는 등록된 기본값을 쓴다.
//! - 보안(secure) 설정은 `JARVIS_<KEY>` 환경변수가 있으면 그 값을 우선한다.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::registry::Registry;
use crate::application::error::StoreError;
use crate::application::ports::SettingsStore;
use crate::application::schema::{SectionSpec, SettingSpec, SettingsSchema};
use crate::domain::settings::RawValue;
use crate::infrastructure::config::{read_document, write_document};

pub struct JsonFileSettingsStore {
    path: PathBuf,
    registry: RwLock<Registry>,
    // 읽기-수정-쓰기 구간을 직렬화한다.
    write_lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            registry: RwLock::new(Registry::default()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn spec(&self, key: &str) -> Result<SettingSpec, StoreError> {
        let registry = self
            .registry
            .read()
            .map_err(|_| StoreError::unavailable("settings registry lock poisoned"))?;
        registry.spec(key).cloned()
    }

    fn with_registry(&self, apply: impl FnOnce(&mut Registry)) -> Result<(), StoreError> {
        let mut registry = self
            .registry
            .write()
            .map_err(|_| StoreError::unavailable("settings registry lock poisoned"))?;
        apply(&mut registry);
        Ok(())
    }
}

/// `openai_api_key` -> `JARVIS_OPENAI_API_KEY`
pub(crate) fn secure_env_name(key: &str) -> String {
    format!("JARVIS_{}", key.to_ascii_uppercase())
}

fn secure_env_override(key: &str) -> Option<String> {
    env::var(secure_env_name(key))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn unavailable(err: anyhow::Error) -> StoreError {
    StoreError::unavailable(format!("{err:#}"))
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn value(&self, key: &str) -> Result<RawValue, StoreError> {
        let spec = self.spec(key)?;

        if spec.secure
            && let Some(v) = secure_env_override(key)
        {
            debug!(key, source = %secure_env_name(key), "using secure setting from environment");
            return Ok(RawValue::String(v));
        }

        let mut document = read_document(&self.path).await.map_err(unavailable)?;
        Ok(document.remove(key).unwrap_or(spec.value))
    }

    async fn set_value(&self, key: &str, value: RawValue) -> Result<(), StoreError> {
        self.spec(key)?.validate(&value)?;

        let _guard = self.write_lock.lock().await;
        let mut document = read_document(&self.path).await.map_err(unavailable)?;
        document.insert(key.to_string(), value);
        write_document(&self.path, &document)
            .await
            .map_err(unavailable)?;
        debug!(key, path = %self.path.display(), "persisted setting");
        Ok(())
    }

    async fn register_section(&self, name: &str, section: SectionSpec) -> Result<(), StoreError> {
        self.with_registry(|registry| registry.register_section(name, section))
    }

    async fn register_settings(&self, schema: SettingsSchema) -> Result<(), StoreError> {
        self.with_registry(|registry| registry.register_settings(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::schema::jarvis_schema;
    use crate::domain::settings::keys;

    async fn registered_store(path: &Path) -> JsonFileSettingsStore {
        let store = JsonFileSettingsStore::new(path);
        store.register_settings(jarvis_schema()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = registered_store(&dir.path().join("settings.json")).await;

        assert_eq!(store.value(keys::TOP_P).await.unwrap(), RawValue::Int(100));
        assert_eq!(
            store.value(keys::CHAT_SUFFIX).await.unwrap(),
            RawValue::from("\\n\\nUser: ")
        );
    }

    #[tokio::test]
    async fn set_value_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = registered_store(&path).await;
        store
            .set_value(keys::MAX_TOKENS, RawValue::Int(1024))
            .await
            .unwrap();
        store
            .set_value(keys::ROLE, RawValue::from(r#"{"Pirate":"Talk like a pirate."}"#))
            .await
            .unwrap();

        let reopened = registered_store(&path).await;
        assert_eq!(
            reopened.value(keys::MAX_TOKENS).await.unwrap(),
            RawValue::Int(1024)
        );
        assert_eq!(
            reopened.value(keys::ROLE).await.unwrap(),
            RawValue::from(r#"{"Pirate":"Talk like a pirate."}"#)
        );
        assert_eq!(reopened.value(keys::TEMPERATURE).await.unwrap(), RawValue::Int(9));
    }

    #[tokio::test]
    async fn invalid_values_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = registered_store(&path).await;

        let err = store
            .set_value(keys::MEMORY_TOKENS, RawValue::Int(8))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_makes_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        let store = registered_store(&path).await;

        assert!(matches!(
            store.value(keys::MODEL).await,
            Err(StoreError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn unregistered_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(
            store.value(keys::MODEL).await,
            Err(StoreError::UnregisteredKey(keys::MODEL.to_string()))
        );
    }

    #[tokio::test]
    async fn secure_setting_prefers_non_blank_environment_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = registered_store(&dir.path().join("settings.json")).await;
        store
            .set_value(keys::OPENAI_API_KEY, RawValue::from("from-file"))
            .await
            .unwrap();
        let env_name = secure_env_name(keys::OPENAI_API_KEY);

        // 이 변수를 바꾸는 테스트는 여기 하나뿐이다.
        unsafe { env::set_var(&env_name, "  from-env ") };
        let from_env = store.value(keys::OPENAI_API_KEY).await;

        unsafe { env::set_var(&env_name, "   ") };
        let blank = store.value(keys::OPENAI_API_KEY).await;

        unsafe { env::set_var(&env_name, "") };
        let empty = store.value(keys::OPENAI_API_KEY).await;

        unsafe { env::remove_var(&env_name) };

        assert_eq!(from_env.unwrap(), RawValue::from("from-env"));
        assert_eq!(blank.unwrap(), RawValue::from("from-file"));
        assert_eq!(empty.unwrap(), RawValue::from("from-file"));
    }

    #[tokio::test]
    async fn environment_does_not_override_plain_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = registered_store(&dir.path().join("settings.json")).await;

        unsafe { env::set_var(secure_env_name(keys::MODEL), "text-ada-001") };
        let model = store.value(keys::MODEL).await;
        unsafe { env::remove_var(secure_env_name(keys::MODEL)) };

        assert_eq!(model.unwrap(), RawValue::from("text-davinci-003"));
    }

    #[test]
    fn secure_env_name_is_uppercased() {
        assert_eq!(secure_env_name(keys::OPENAI_API_KEY), "JARVIS_OPENAI_API_KEY");
    }
}
