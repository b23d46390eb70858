//! 단위 정의 및 변환 모듈 모음.

pub mod flow_rate;
pub mod length;

pub use flow_rate::{convert_flow_rate, flow_rate_m3_per_s, FlowRateUnit, M3_PER_S_PER_CFM};
pub use length::{m_to_mm, mm_to_m};
