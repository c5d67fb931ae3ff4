//! 유스케이스 모음.

pub mod edit_setting;
pub mod inspect_settings;
pub mod register_settings;
pub mod resolve_settings;
