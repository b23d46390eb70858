use crate::duct::LockedDimension;
use crate::units::FlowRateUnit;

/// 단위/항목 문자열 해석 시 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 알 수 없는 고정 치수 이름
    #[error("알 수 없는 치수: {0} (width 또는 height)")]
    UnknownDimension(String),
}

/// 문자열로 전달된 유량 단위명을 enum으로 변환한다.
///
/// 대소문자를 구분하지 않으며 `m3/s`, `m³/s`, `cms`, `l/s`, `lps`, `cfm` 을 받는다.
pub fn parse_flow_rate_unit(s: &str) -> Result<FlowRateUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m3/s" | "m³/s" | "m^3/s" | "cms" => Ok(FlowRateUnit::CubicMeterPerSecond),
        "l/s" | "lps" | "liter/s" | "litre/s" => Ok(FlowRateUnit::LiterPerSecond),
        "cfm" | "ft3/min" => Ok(FlowRateUnit::Cfm),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 고정할 치수 이름을 해석한다.
pub fn parse_locked_dimension(s: &str) -> Result<LockedDimension, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "width" | "w" => Ok(LockedDimension::Width),
        "height" | "h" => Ok(LockedDimension::Height),
        _ => Err(ConversionError::UnknownDimension(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_aliases_are_case_insensitive() {
        assert_eq!(
            parse_flow_rate_unit("M3/S").unwrap(),
            FlowRateUnit::CubicMeterPerSecond
        );
        assert_eq!(parse_flow_rate_unit(" L/s ").unwrap(), FlowRateUnit::LiterPerSecond);
        assert_eq!(parse_flow_rate_unit("CFM").unwrap(), FlowRateUnit::Cfm);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = parse_flow_rate_unit("gpm").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(ref u) if u == "gpm"));
    }

    #[test]
    fn locked_dimension_names() {
        assert_eq!(parse_locked_dimension("W").unwrap(), LockedDimension::Width);
        assert_eq!(parse_locked_dimension("height").unwrap(), LockedDimension::Height);
        assert!(parse_locked_dimension("depth").is_err());
    }
}
