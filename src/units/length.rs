//! 길이 환산. 덕트 치수 입력은 mm, 내부 계산은 m 기준이다.

/// mm → m
pub fn mm_to_m(value_mm: f64) -> f64 {
    value_mm / 1000.0
}

/// m → mm
pub fn m_to_mm(value_m: f64) -> f64 {
    value_m * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimeters_and_meters() {
        assert_eq!(mm_to_m(250.0), 0.25);
        assert_eq!(m_to_mm(0.3), 300.0);
    }
}
