//! 공기 물성 계산 모듈.

pub mod psychrometrics;

pub use psychrometrics::{air_properties, AirProperties};
