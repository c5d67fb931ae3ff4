//! 설정 파일 경로 탐색 및 JSON 문서 읽기/쓰기.

use std::collections::BTreeMap;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::domain::settings::RawValue;

pub const SETTINGS_PATH_ENV: &str = "JARVIS_SETTINGS";

/// 저장된(기본값이 아닌) 설정값 문서.
pub type SettingsDocument = BTreeMap<String, RawValue>;

/// 명시 경로 > `JARVIS_SETTINGS` > 사용자 설정 디렉터리 > 로컬 `.jarvis` 순으로 결정한다.
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(path) = env::var_os(SETTINGS_PATH_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("jarvis").join("settings.json");
    }

    PathBuf::from(".jarvis/settings.json")
}

/// 파일이 없으면 빈 문서를 반환한다.
pub async fn read_document(path: &Path) -> Result<SettingsDocument> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "settings file missing, using defaults");
            return Ok(SettingsDocument::new());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings at {}", path.display()));
        }
    };

    if raw.trim().is_empty() {
        return Ok(SettingsDocument::new());
    }

    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))
}

/// 상위 디렉터리를 만들고 문서를 통째로 다시 쓴다.
pub async fn write_document(path: &Path, document: &SettingsDocument) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let rendered = serde_json::to_string_pretty(document)?;
    fs::write(path, format!("{rendered}\n"))
        .await
        .with_context(|| format!("failed to write settings at {}", path.display()))
}
