//! Domain layer
//! 설정 스냅샷/드롭다운 병합/스케일 변환 규칙을 저장소와 무관하게 표현한다.

pub mod dropdown;
pub mod presets;
pub mod scale;
pub mod settings;
