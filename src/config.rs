use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::duct::DEFAULT_SIZE_INCREMENT_MM;
use crate::material_db::{RoughnessTable, DEFAULT_MATERIAL};
use crate::units::FlowRateUnit;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력을 생략했을 때 쓰는 기본값 모음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub flow_unit: FlowRateUnit,
    pub material: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub size_increment_mm: u32,
    pub max_velocity_m_per_s: f64,
    pub max_pressure_drop_pa_per_m: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            flow_unit: FlowRateUnit::LiterPerSecond,
            material: DEFAULT_MATERIAL.to_string(),
            temperature_c: 20.0,
            humidity_pct: 50.0,
            size_increment_mm: DEFAULT_SIZE_INCREMENT_MM,
            max_velocity_m_per_s: 5.0,
            max_pressure_drop_pa_per_m: 1.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    /// 기본 재질 테이블에 추가(또는 덮어쓸) 재질 [mm]
    pub extra_materials: BTreeMap<String, f64>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 조도 값이 잘못된 경우
    #[error("재질 '{name}' 의 조도는 0 이상이어야 합니다: {roughness_mm}")]
    InvalidRoughness { name: String, roughness_mm: f64 },
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "created default config");
        cfg
    };
    cfg.validate()?;
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, &roughness_mm) in &self.extra_materials {
            if !(roughness_mm.is_finite() && roughness_mm >= 0.0) {
                return Err(ConfigError::InvalidRoughness {
                    name: name.clone(),
                    roughness_mm,
                });
            }
        }
        Ok(())
    }

    /// 설정을 로드한 파일(없으면 기본 경로)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    /// 기본 재질에 설정의 추가 재질을 반영한 조도 테이블을 만든다.
    pub fn roughness_table(&self) -> RoughnessTable {
        RoughnessTable::standard().extended(&self.extra_materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_preserves_fields() {
        let mut cfg = Config::default();
        cfg.defaults.material = "Aluminum".to_string();
        cfg.defaults.size_increment_mm = 25;
        cfg.extra_materials.insert("Flexible Duct".to_string(), 0.9);
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: Config = toml::from_str("[defaults]\ntemperature_c = 30.0\n").unwrap();
        assert_eq!(cfg.defaults.temperature_c, 30.0);
        assert_eq!(cfg.defaults.size_increment_mm, 50);
        assert!(cfg.extra_materials.is_empty());
    }

    #[test]
    fn negative_roughness_is_rejected() {
        let mut cfg = Config::default();
        cfg.extra_materials.insert("Bad".to_string(), -0.1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRoughness { .. })
        ));
    }

    #[test]
    fn load_creates_file_when_missing() {
        let dir = std::env::temp_dir().join(format!("duct_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);
        let cfg = load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.defaults, Defaults::default());
        let again = load_or_default(&path).unwrap();
        assert_eq!(again.defaults, cfg.defaults);
        fs::remove_dir_all(&dir).unwrap();
    }
}
