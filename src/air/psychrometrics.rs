/// 20 °C, 해수면 기준 공기 밀도 [kg/m3]
pub const REFERENCE_DENSITY_KG_PER_M3: f64 = 1.225;
/// 20 °C 기준 동점성계수 [m2/s]
pub const REFERENCE_KINEMATIC_VISCOSITY_M2_PER_S: f64 = 1.5e-5;
/// 기준 온도 20 °C [K]
pub const REFERENCE_TEMPERATURE_K: f64 = 293.15;

const KELVIN_OFFSET: f64 = 273.15;

/// 온도로부터 구한 공기 물성.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirProperties {
    /// 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 동점성계수 [m2/s]
    pub kinematic_viscosity_m2_per_s: f64,
}

/// 건구온도로 공기 밀도와 동점성계수를 근사 계산한다.
///
/// 밀도는 20 °C 기준 밀도를 이상기체 온도비로 보정하고,
/// 동점성계수는 (T/T0)^0.7 경험식으로 보정한다.
///
/// 상대습도는 인자로 받지만 이 단순 모델에서는 사용하지 않는다.
/// 절대온도가 0 이하가 되는 입력은 검증하지 않으므로 호출 측에서 범위를 확인해야 한다.
pub fn air_properties(temperature_c: f64, _humidity_pct: f64) -> AirProperties {
    let t_k = KELVIN_OFFSET + temperature_c;
    AirProperties {
        density_kg_per_m3: REFERENCE_DENSITY_KG_PER_M3 * (REFERENCE_TEMPERATURE_K / t_k),
        kinematic_viscosity_m2_per_s: REFERENCE_KINEMATIC_VISCOSITY_M2_PER_S
            * (t_k / REFERENCE_TEMPERATURE_K).powf(0.7),
    }
}
