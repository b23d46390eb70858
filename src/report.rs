//! 계산 결과의 표시용 반올림과 CSV 내보내기.
//!
//! 계산 체인은 항상 반올림하지 않은 값을 사용하고, 반올림은 이 모듈에서만 한다.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::batch::BatchOutcome;
use crate::duct::{DuctCalcInput, DuctCalcResult, FlowType, SizeOptimizationResult};
use crate::units::{convert_flow_rate, FlowRateUnit};

/// 웹 계산기 내보내기와 같은 열 순서/머리글.
pub const CSV_HEADER: &str = "Flowrate,Width,Height,Temperature,Humidity,Material,\
Equivalent Diameter,Average Velocity,Pressure Drop,Reynolds Number";

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// 정수로 반올림한다. 유한하지 않은 값은 `None`.
fn round_whole(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.round() as i64)
}

/// 화면/CSV 표시용으로 반올림한 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub equivalent_diameter_mm: f64,
    pub average_velocity_m_per_s: f64,
    pub effective_velocity_m_per_s: f64,
    pub pressure_drop_pa_per_m: f64,
    pub velocity_pressure_pa: f64,
    pub cross_sectional_area_mm2: i64,
    /// 온도가 비정상이면 유한하지 않을 수 있어 `None` 으로 둔다.
    pub reynolds_number: Option<i64>,
    pub flow_type: FlowType,
    pub friction_factor: f64,
    pub air_density_kg_per_m3: f64,
}

impl DisplayRow {
    pub fn from_result(result: &DuctCalcResult) -> Self {
        Self {
            equivalent_diameter_mm: round_to(result.equivalent_diameter_mm, 1),
            average_velocity_m_per_s: round_to(result.average_velocity_m_per_s, 2),
            effective_velocity_m_per_s: round_to(result.effective_velocity_m_per_s, 2),
            pressure_drop_pa_per_m: round_to(result.pressure_drop_pa_per_m, 3),
            velocity_pressure_pa: round_to(result.velocity_pressure_pa, 3),
            cross_sectional_area_mm2: result.cross_sectional_area_mm2.round() as i64,
            reynolds_number: round_whole(result.reynolds_number),
            flow_type: result.flow_type,
            friction_factor: round_to(result.friction_factor, 4),
            air_density_kg_per_m3: round_to(result.air_density_kg_per_m3, 3),
        }
    }
}

/// RFC 4180 규칙으로 필드를 따옴표 처리한다.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// CSV 한 줄(줄바꿈 제외)을 만든다. 유량은 `flow_unit` 으로 환산해 쓴다.
pub fn csv_row(
    input: &DuctCalcInput,
    result: &DuctCalcResult,
    flow_unit: FlowRateUnit,
) -> String {
    let row = DisplayRow::from_result(result);
    let flow_rate = round_to(convert_flow_rate(input.flow_rate, input.flow_unit, flow_unit), 6);
    let reynolds = row
        .reynolds_number
        .map(|re| re.to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{:.1},{:.2},{:.3},{}",
        flow_rate,
        input.width_mm,
        input.height_mm,
        input.temperature_c,
        input.humidity_pct,
        csv_field(&input.material),
        row.equivalent_diameter_mm,
        row.average_velocity_m_per_s,
        row.pressure_drop_pa_per_m,
        reynolds,
    )
}

/// 배치 결과를 CSV 문자열로 만든다. 실패한 시나리오는 건너뛴다.
///
/// 머리글에 단위 열이 없으므로 모든 행의 유량을 `flow_unit` 하나로 맞춘다.
pub fn to_csv(outcomes: &[BatchOutcome], flow_unit: FlowRateUnit) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => {
                csv.push_str(&csv_row(&outcome.input, result, flow_unit));
                csv.push('\n');
            }
            Err(err) => {
                tracing::warn!(index = outcome.index, error = %err, "skipping failed scenario in CSV");
            }
        }
    }
    csv
}

pub fn write_csv(
    path: impl AsRef<Path>,
    outcomes: &[BatchOutcome],
    flow_unit: FlowRateUnit,
) -> std::io::Result<()> {
    fs::write(path, to_csv(outcomes, flow_unit))
}

/// 계산 결과를 사람이 읽는 형식으로 만든다.
pub fn format_result(input: &DuctCalcInput, result: &DuctCalcResult) -> String {
    let row = DisplayRow::from_result(result);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "덕트 {} x {} mm, 유량 {} {}, {} °C, {}",
        input.width_mm,
        input.height_mm,
        input.flow_rate,
        input.flow_unit,
        input.temperature_c,
        input.material
    );
    let _ = writeln!(out, "  상당 직경      : {:.1} mm", row.equivalent_diameter_mm);
    let _ = writeln!(out, "  단면적         : {} mm2", row.cross_sectional_area_mm2);
    let _ = writeln!(out, "  평균 유속      : {:.2} m/s", row.average_velocity_m_per_s);
    let _ = writeln!(out, "  유효 유속      : {:.2} m/s", row.effective_velocity_m_per_s);
    let _ = writeln!(out, "  동압           : {:.3} Pa", row.velocity_pressure_pa);
    let _ = writeln!(out, "  압력손실       : {:.3} Pa/m", row.pressure_drop_pa_per_m);
    let reynolds = row
        .reynolds_number
        .map(|re| re.to_string())
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "  레이놀즈수     : {} ({})", reynolds, row.flow_type);
    let _ = writeln!(out, "  마찰계수       : {:.4}", row.friction_factor);
    let _ = writeln!(out, "  공기 밀도      : {:.3} kg/m3", row.air_density_kg_per_m3);
    out
}

/// 치수 선정 결과를 사람이 읽는 형식으로 만든다.
pub fn format_optimization(result: &SizeOptimizationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "추천 치수: {} x {} mm (W x H)",
        result.width_mm, result.height_mm
    );
    let _ = writeln!(
        out,
        "  유속 {:.2} m/s, 압력손실 {:.3} Pa/m",
        result.velocity_m_per_s, result.pressure_drop_pa_per_m
    );
    if result.growth_steps > 0 {
        let _ = writeln!(
            out,
            "  압력손실 조건으로 {}회 확대함",
            result.growth_steps
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_export_columns() {
        let cols: Vec<&str> = CSV_HEADER.split(',').collect();
        assert_eq!(
            cols,
            [
                "Flowrate",
                "Width",
                "Height",
                "Temperature",
                "Humidity",
                "Material",
                "Equivalent Diameter",
                "Average Velocity",
                "Pressure Drop",
                "Reynolds Number"
            ]
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("PVC"), "PVC");
        assert_eq!(csv_field("Steel, lined"), "\"Steel, lined\"");
        assert_eq!(csv_field("6\" flex"), "\"6\"\" flex\"");
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_to(272.727_27, 1), 272.7);
        assert_eq!(round_to(2.666_66, 2), 2.67);
    }

    #[test]
    fn non_finite_reynolds_is_left_blank() {
        assert_eq!(round_whole(f64::NAN), None);
        assert_eq!(round_whole(f64::INFINITY), None);
        assert_eq!(round_whole(36_363.6), Some(36_364));

        let input = DuctCalcInput {
            flow_rate: 0.2,
            flow_unit: FlowRateUnit::CubicMeterPerSecond,
            width_mm: 300.0,
            height_mm: 250.0,
            temperature_c: 25.0,
            humidity_pct: 50.0,
            material: "PVC".to_string(),
        };
        let mut result =
            crate::duct::calculate(&input, &crate::material_db::RoughnessTable::standard())
                .unwrap();
        result.reynolds_number = f64::NAN;
        assert_eq!(DisplayRow::from_result(&result).reynolds_number, None);
        let row = csv_row(&input, &result, FlowRateUnit::CubicMeterPerSecond);
        assert!(row.starts_with("0.2,300,250,"));
        assert!(row.ends_with(','));
        assert!(format_result(&input, &result).contains("레이놀즈수     : - ("));
    }
}
