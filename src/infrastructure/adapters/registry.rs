//! 저장소 어댑터 공용 스키마 레지스트리.

use std::collections::HashMap;

use crate::application::error::StoreError;
use crate::application::schema::{SectionSpec, SettingSpec, SettingsSchema};

#[derive(Debug, Default)]
pub(crate) struct Registry {
    sections: HashMap<String, SectionSpec>,
    specs: HashMap<String, SettingSpec>,
}

impl Registry {
    pub fn register_section(&mut self, name: &str, section: SectionSpec) {
        self.sections.insert(name.to_string(), section);
    }

    /// 같은 키를 다시 등록하면 나중 스펙으로 덮어쓴다.
    pub fn register_settings(&mut self, schema: SettingsSchema) {
        for spec in schema {
            self.specs.insert(spec.key.clone(), spec);
        }
    }

    pub fn spec(&self, key: &str) -> Result<&SettingSpec, StoreError> {
        self.specs
            .get(key)
            .ok_or_else(|| StoreError::UnregisteredKey(key.to_string()))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }
}
