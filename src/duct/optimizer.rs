use crate::material_db::RoughnessTable;
use crate::units::{flow_rate_m3_per_s, m_to_mm, mm_to_m, FlowRateUnit};

use super::hydraulics::{calculate, DuctCalcError, DuctCalcInput, DuctCalcResult};

/// 치수 증분 기본값 [mm]
pub const DEFAULT_SIZE_INCREMENT_MM: u32 = 50;
/// 압력손실 조건을 맞추기 위해 치수를 키우는 최대 횟수
pub const MAX_GROWTH_STEPS: u32 = 20;

/// 고정할 덕트 치수.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockedDimension {
    Width,
    Height,
}

impl LockedDimension {
    fn label(self) -> &'static str {
        match self {
            LockedDimension::Width => "width",
            LockedDimension::Height => "height",
        }
    }
}

impl std::fmt::Display for LockedDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 치수 선정 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizeOptimizationError {
    /// 요청값이 잘못된 경우
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
    /// 증분 한도 내에서 압력손실 조건을 만족하지 못한 경우
    #[error(
        "{attempts}회 확대 후에도 압력손실 {last_pressure_drop_pa_per_m:.3} Pa/m 가 \
         허용치 {max_pressure_drop_pa_per_m} Pa/m 를 넘습니다 (마지막 후보 {last_width_mm} x {last_height_mm} mm). \
         허용 압력손실, 최대 유속 또는 증분을 조정하세요."
    )]
    ConstraintUnsatisfiable {
        attempts: u32,
        last_width_mm: u32,
        last_height_mm: u32,
        last_pressure_drop_pa_per_m: f64,
        max_pressure_drop_pa_per_m: f64,
    },
    /// 후보 치수 계산 실패
    #[error(transparent)]
    Calculation(#[from] DuctCalcError),
}

/// 한 변을 고정하고 다른 변을 찾는 치수 선정 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeOptimizationRequest {
    pub flow_rate: f64,
    pub flow_unit: FlowRateUnit,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub material: String,
    pub locked_dimension: LockedDimension,
    pub locked_value_mm: f64,
    pub max_velocity_m_per_s: f64,
    pub max_pressure_drop_pa_per_m: f64,
    pub size_increment_mm: u32,
}

/// 치수 선정 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeOptimizationResult {
    /// 폭 [mm] (정수 반올림)
    pub width_mm: u32,
    /// 높이 [mm] (정수 반올림)
    pub height_mm: u32,
    pub velocity_m_per_s: f64,
    pub pressure_drop_pa_per_m: f64,
    /// 직접 추정 이후 치수를 키운 횟수. 직접 추정으로 바로 만족하면 0.
    pub growth_steps: u32,
}

impl SizeOptimizationRequest {
    fn validate(&self) -> Result<(), SizeOptimizationError> {
        if !(self.flow_rate.is_finite() && self.flow_rate > 0.0) {
            return Err(SizeOptimizationError::InvalidInput(
                "유량은 0보다 커야 합니다.",
            ));
        }
        if !(self.locked_value_mm.is_finite() && self.locked_value_mm > 0.0) {
            return Err(SizeOptimizationError::InvalidInput(
                "고정 치수는 0보다 커야 합니다.",
            ));
        }
        if !(self.max_velocity_m_per_s.is_finite() && self.max_velocity_m_per_s > 0.0) {
            return Err(SizeOptimizationError::InvalidInput(
                "최대 유속은 0보다 커야 합니다.",
            ));
        }
        if !self.max_pressure_drop_pa_per_m.is_finite() {
            return Err(SizeOptimizationError::InvalidInput(
                "허용 압력손실은 유한한 값이어야 합니다.",
            ));
        }
        if self.size_increment_mm == 0 {
            return Err(SizeOptimizationError::InvalidInput(
                "치수 증분은 1 mm 이상이어야 합니다.",
            ));
        }
        Ok(())
    }

    /// 고정하지 않은 변의 길이로 계산 입력을 만든다.
    fn candidate(&self, free_mm: f64) -> DuctCalcInput {
        let (width_mm, height_mm) = match self.locked_dimension {
            LockedDimension::Width => (self.locked_value_mm, free_mm),
            LockedDimension::Height => (free_mm, self.locked_value_mm),
        };
        DuctCalcInput {
            flow_rate: self.flow_rate,
            flow_unit: self.flow_unit,
            width_mm,
            height_mm,
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
            material: self.material.clone(),
        }
    }
}

/// 최대 유속 조건으로 고정하지 않은 변의 길이를 직접 추정한다 [mm].
///
/// 결과는 증분의 배수로 올림한다 (내림하지 않는다).
pub fn direct_estimate_mm(request: &SizeOptimizationRequest) -> f64 {
    let flow_m3_s = flow_rate_m3_per_s(request.flow_rate, request.flow_unit);
    let locked_m = mm_to_m(request.locked_value_mm);
    let raw_mm = m_to_mm(flow_m3_s / (request.max_velocity_m_per_s * locked_m));
    round_up_to_increment(raw_mm, request.size_increment_mm)
}

/// 증분 배수 판정에 쓰는 허용 오차 (증분 단위).
const GRID_TOLERANCE: f64 = 1e-9;

/// 값을 증분의 다음 배수로 올림한다.
///
/// 부동소수 오차로 격자점을 살짝 넘은 값은 그 격자점으로 본다.
pub fn round_up_to_increment(value_mm: f64, increment_mm: u32) -> f64 {
    let inc = f64::from(increment_mm);
    ((value_mm / inc) - GRID_TOLERANCE).ceil() * inc
}

/// 검증을 통과한 양의 치수 [mm] 를 정수로 반올림한다.
fn whole_mm(value_mm: f64) -> u32 {
    value_mm.round() as u32
}

fn accept(
    input: &DuctCalcInput,
    result: &DuctCalcResult,
    growth_steps: u32,
) -> SizeOptimizationResult {
    SizeOptimizationResult {
        width_mm: whole_mm(input.width_mm),
        height_mm: whole_mm(input.height_mm),
        velocity_m_per_s: result.average_velocity_m_per_s,
        pressure_drop_pa_per_m: result.pressure_drop_pa_per_m,
        growth_steps,
    }
}

/// 한 변을 고정한 채 유속/압력손실 조건을 만족하는 다른 변의 길이를 찾는다.
///
/// 최대 유속으로 직접 추정한 치수를 먼저 검토하고, 압력손실이 허용치를 넘으면
/// 증분만큼씩 최대 20회 키워 처음으로 조건을 만족하는 치수를 반환한다.
pub fn optimize(
    request: &SizeOptimizationRequest,
    materials: &RoughnessTable,
) -> Result<SizeOptimizationResult, SizeOptimizationError> {
    request.validate()?;

    let increment = f64::from(request.size_increment_mm);
    let mut free_mm = direct_estimate_mm(request);
    let mut input = request.candidate(free_mm);
    let mut result = calculate(&input, materials)?;
    tracing::debug!(
        locked = %request.locked_dimension,
        free_mm,
        velocity = result.average_velocity_m_per_s,
        pressure_drop = result.pressure_drop_pa_per_m,
        "direct estimate"
    );
    if result.pressure_drop_pa_per_m <= request.max_pressure_drop_pa_per_m {
        return Ok(accept(&input, &result, 0));
    }

    for step in 1..=MAX_GROWTH_STEPS {
        free_mm += increment;
        input = request.candidate(free_mm);
        result = calculate(&input, materials)?;
        tracing::debug!(
            step,
            free_mm,
            velocity = result.average_velocity_m_per_s,
            pressure_drop = result.pressure_drop_pa_per_m,
            "growth step"
        );
        if result.pressure_drop_pa_per_m <= request.max_pressure_drop_pa_per_m {
            return Ok(accept(&input, &result, step));
        }
    }

    Err(SizeOptimizationError::ConstraintUnsatisfiable {
        attempts: MAX_GROWTH_STEPS,
        last_width_mm: whole_mm(input.width_mm),
        last_height_mm: whole_mm(input.height_mm),
        last_pressure_drop_pa_per_m: result.pressure_drop_pa_per_m,
        max_pressure_drop_pa_per_m: request.max_pressure_drop_pa_per_m,
    })
}
