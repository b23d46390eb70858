use crate::air::{air_properties, AirProperties};
use crate::material_db::RoughnessTable;
use crate::units::{flow_rate_m3_per_s, m_to_mm, mm_to_m, FlowRateUnit};

use super::friction::{friction_factor, FlowType};

/// 경계층 영향을 단순 반영한 유효 유속 보정 계수.
pub const EFFECTIVE_VELOCITY_FACTOR: f64 = 0.98;

/// 덕트 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DuctCalcError {
    /// 폭/높이가 0 이하이거나 유한하지 않은 경우
    #[error("덕트 치수는 0보다 커야 합니다 (폭 {width_mm} mm, 높이 {height_mm} mm)")]
    InvalidGeometry { width_mm: f64, height_mm: f64 },
    /// 유량이 0 이하이거나 유한하지 않은 경우
    #[error("유량은 0보다 커야 합니다 ({0})")]
    InvalidFlowRate(f64),
}

/// 사각 덕트 계산 입력값.
#[derive(Debug, Clone, PartialEq)]
pub struct DuctCalcInput {
    pub flow_rate: f64,
    pub flow_unit: FlowRateUnit,
    pub width_mm: f64,
    pub height_mm: f64,
    pub temperature_c: f64,
    /// 상대습도 [%] (현재 공기 물성 계산에는 쓰이지 않는다)
    pub humidity_pct: f64,
    /// 조도 테이블 키
    pub material: String,
}

/// 사각 덕트 계산 결과. 모든 값은 반올림하지 않은 값이다.
#[derive(Debug, Clone, PartialEq)]
pub struct DuctCalcResult {
    pub equivalent_diameter_mm: f64,
    pub average_velocity_m_per_s: f64,
    pub effective_velocity_m_per_s: f64,
    /// 단위 길이당 압력손실 [Pa/m]
    pub pressure_drop_pa_per_m: f64,
    pub velocity_pressure_pa: f64,
    pub cross_sectional_area_mm2: f64,
    pub reynolds_number: f64,
    pub flow_type: FlowType,
    pub friction_factor: f64,
    pub air_density_kg_per_m3: f64,
    /// 실제 적용된 절대 조도 [mm]
    pub roughness_mm: f64,
}

/// 사각 단면의 수력 직경 [m] = 4A / P
pub fn hydraulic_diameter_m(width_m: f64, height_m: f64) -> f64 {
    let area = width_m * height_m;
    4.0 * area / (2.0 * (width_m + height_m))
}

/// Darcy-Weisbach 단위 길이당 압력손실 [Pa/m]
///
/// ΔP/L = f · ρ · v² / (2 · D_h)
pub fn darcy_pressure_gradient(
    friction_factor: f64,
    density_kg_per_m3: f64,
    velocity_m_per_s: f64,
    hydraulic_diameter_m: f64,
) -> f64 {
    friction_factor * (density_kg_per_m3 * velocity_m_per_s * velocity_m_per_s)
        / (2.0 * hydraulic_diameter_m)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// 사각 덕트의 유속, 레이놀즈수, 마찰계수, 압력손실을 계산한다.
pub fn calculate(
    input: &DuctCalcInput,
    materials: &RoughnessTable,
) -> Result<DuctCalcResult, DuctCalcError> {
    if !is_positive(input.width_mm) || !is_positive(input.height_mm) {
        return Err(DuctCalcError::InvalidGeometry {
            width_mm: input.width_mm,
            height_mm: input.height_mm,
        });
    }
    if !is_positive(input.flow_rate) {
        return Err(DuctCalcError::InvalidFlowRate(input.flow_rate));
    }

    let flow_m3_s = flow_rate_m3_per_s(input.flow_rate, input.flow_unit);
    let width = mm_to_m(input.width_mm);
    let height = mm_to_m(input.height_mm);
    let area = width * height;
    let diameter = hydraulic_diameter_m(width, height);
    let equivalent_diameter_mm = m_to_mm(diameter);
    let velocity = flow_m3_s / area;

    let AirProperties {
        density_kg_per_m3: density,
        kinematic_viscosity_m2_per_s: nu,
    } = air_properties(input.temperature_c, input.humidity_pct);

    let velocity_pressure = 0.5 * density * velocity * velocity;
    let reynolds = velocity * diameter / nu;
    let flow_type = FlowType::from_reynolds(reynolds);
    let roughness_mm = materials.roughness_mm(&input.material);
    let f = friction_factor(reynolds, roughness_mm, equivalent_diameter_mm);
    let pressure_drop = darcy_pressure_gradient(f, density, velocity, diameter);

    Ok(DuctCalcResult {
        equivalent_diameter_mm,
        average_velocity_m_per_s: velocity,
        effective_velocity_m_per_s: velocity * EFFECTIVE_VELOCITY_FACTOR,
        pressure_drop_pa_per_m: pressure_drop,
        velocity_pressure_pa: velocity_pressure,
        cross_sectional_area_mm2: input.width_mm * input.height_mm,
        reynolds_number: reynolds,
        flow_type,
        friction_factor: f,
        air_density_kg_per_m3: density,
        roughness_mm,
    })
}
