//! 원시 정수 설정값을 의미 단위로 변환하는 스케일 규칙.
//!
//! - 반올림/클램핑을 하지 않는다. 범위 검증은 저장소(스키마) 책임이다.

/// 원시 정수값을 고정 제수로 나누는 변환 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    divisor: u32,
}

/// `temp` (0..=10) -> 0.0..=1.0
pub const TEMPERATURE: Scale = Scale::new(10);
/// `top_p` (0..=100) -> 0.0..=1.0
pub const TOP_P: Scale = Scale::new(100);
/// `frequency_penalty`/`presence_penalty` (-20..=20) -> -2.0..=2.0
pub const PENALTY: Scale = Scale::new(10);

impl Scale {
    pub const fn new(divisor: u32) -> Self {
        Self { divisor }
    }

    pub fn apply(self, raw: i64) -> f64 {
        raw as f64 / f64::from(self.divisor)
    }
}

/// 저장된 문자열의 리터럴 `\n`(두 글자)을 실제 개행으로 바꾼다.
pub fn unescape_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
