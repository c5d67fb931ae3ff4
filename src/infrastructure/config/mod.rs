//! 설정 파일 위치 결정과 영속 문서 입출력.

mod loader;

pub use loader::{SETTINGS_PATH_ENV, SettingsDocument, read_document, settings_path, write_document};
