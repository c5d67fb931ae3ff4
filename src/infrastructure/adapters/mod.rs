//! 설정 저장소 포트를 실제 저장 매체로 연결하는 어댑터 계층.

mod file_store;
mod memory_store;
mod registry;

pub use file_store::JsonFileSettingsStore;
pub use memory_store::InMemorySettingsStore;
