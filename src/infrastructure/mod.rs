//! Infrastructure layer
//! 설정 저장 매체(메모리/JSON 파일)와 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod config;
