//! TOML 시나리오 파일을 읽어 덕트 계산을 순차 실행한다.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::conversion::{self, ConversionError};
use crate::duct::{calculate, DuctCalcError, DuctCalcInput, DuctCalcResult};
use crate::material_db::RoughnessTable;

/// 배치 파일 처리 오류.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("배치 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("배치 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("시나리오 {index}: {source}")]
    Conversion {
        index: usize,
        #[source]
        source: ConversionError,
    },
}

/// 배치 파일의 시나리오 한 건. 생략한 항목은 설정 기본값을 따른다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub flow_rate: f64,
    /// 유량 단위 문자열 (m3/s, l/s, cfm)
    #[serde(default)]
    pub unit: Option<String>,
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub material: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BatchFile {
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<BatchScenario>,
}

/// 시나리오 한 건의 실행 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// 파일 내 순번 (1부터)
    pub index: usize,
    pub name: Option<String>,
    pub input: DuctCalcInput,
    pub result: Result<DuctCalcResult, DuctCalcError>,
}

pub fn parse_batch(text: &str) -> Result<BatchFile, BatchError> {
    Ok(toml::from_str(text)?)
}

pub fn load_batch_file(path: impl AsRef<Path>) -> Result<BatchFile, BatchError> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_batch(&text)
}

impl BatchScenario {
    /// 설정 기본값을 채워 계산 입력으로 변환한다.
    pub fn resolve(&self, index: usize, cfg: &Config) -> Result<DuctCalcInput, BatchError> {
        let flow_unit = match &self.unit {
            Some(u) => conversion::parse_flow_rate_unit(u)
                .map_err(|source| BatchError::Conversion { index, source })?,
            None => cfg.defaults.flow_unit,
        };
        Ok(DuctCalcInput {
            flow_rate: self.flow_rate,
            flow_unit,
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            temperature_c: self.temperature_c.unwrap_or(cfg.defaults.temperature_c),
            humidity_pct: self.humidity_pct.unwrap_or(cfg.defaults.humidity_pct),
            material: self
                .material
                .clone()
                .unwrap_or_else(|| cfg.defaults.material.clone()),
        })
    }
}

/// 모든 시나리오를 파일 순서대로 계산한다.
///
/// 단위 문자열이 잘못된 시나리오가 있으면 계산 전에 실패한다.
/// 계산 단계의 오류는 해당 시나리오 결과에만 기록하고 나머지는 계속 진행한다.
pub fn run_batch(
    file: &BatchFile,
    cfg: &Config,
    materials: &RoughnessTable,
) -> Result<Vec<BatchOutcome>, BatchError> {
    let inputs = file
        .scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| s.resolve(i + 1, cfg).map(|input| (i + 1, s, input)))
        .collect::<Result<Vec<_>, _>>()?;

    let outcomes: Vec<BatchOutcome> = inputs
        .into_iter()
        .map(|(index, scenario, input)| {
            let result = calculate(&input, materials);
            if let Err(err) = &result {
                tracing::warn!(index, error = %err, "scenario failed");
            }
            BatchOutcome {
                index,
                name: scenario.name.clone(),
                input,
                result,
            }
        })
        .collect();
    tracing::info!(
        total = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        "batch finished"
    );
    Ok(outcomes)
}
