//! Application layer
//! 유스케이스를 정의하고 포트(설정 저장소)를 통해 인프라를 사용한다.

pub mod error;
pub mod ports;
pub mod schema;
pub mod usecases;
