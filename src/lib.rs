//! 사각 덕트 공기 유동 계산 로직을 라이브러리로 분리하여 CLI 와 배치 실행이 함께 사용한다.

pub mod air;
pub mod app;
pub mod batch;
pub mod config;
pub mod conversion;
pub mod duct;
pub mod material_db;
pub mod report;
pub mod ui_cli;
pub mod units;
