use serde::{Deserialize, Serialize};

/// 1 CFM 을 m3/s 로 환산한 값.
pub const M3_PER_S_PER_CFM: f64 = 0.000471947;

/// 체적 유량 단위. 내부 기준은 m3/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRateUnit {
    CubicMeterPerSecond,
    LiterPerSecond,
    Cfm,
}

impl FlowRateUnit {
    /// 화면 표시 및 CSV 출력용 단위 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            FlowRateUnit::CubicMeterPerSecond => "m3/s",
            FlowRateUnit::LiterPerSecond => "L/s",
            FlowRateUnit::Cfm => "CFM",
        }
    }
}

impl std::fmt::Display for FlowRateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

fn to_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::LiterPerSecond => value / 1000.0,
        FlowRateUnit::Cfm => value * M3_PER_S_PER_CFM,
    }
}

fn from_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::LiterPerSecond => value * 1000.0,
        FlowRateUnit::Cfm => value / M3_PER_S_PER_CFM,
    }
}

/// 체적 유량을 변환한다.
pub fn convert_flow_rate(value: f64, from: FlowRateUnit, to: FlowRateUnit) -> f64 {
    if from == to {
        return value;
    }
    let base = to_m3_per_s(value, from);
    from_m3_per_s(base, to)
}

/// 임의 단위의 유량을 m3/s 로 정규화한다.
pub fn flow_rate_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    to_m3_per_s(value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liters_and_cubic_meters_agree() {
        assert_eq!(flow_rate_m3_per_s(1000.0, FlowRateUnit::LiterPerSecond), 1.0);
        assert_eq!(flow_rate_m3_per_s(1.0, FlowRateUnit::CubicMeterPerSecond), 1.0);
    }

    #[test]
    fn cfm_uses_fixed_factor() {
        let q = flow_rate_m3_per_s(1000.0, FlowRateUnit::Cfm);
        assert!((q - 0.471947).abs() < 1e-12);
        let back = convert_flow_rate(q, FlowRateUnit::CubicMeterPerSecond, FlowRateUnit::Cfm);
        assert!((back - 1000.0).abs() < 1e-9);
    }
}
