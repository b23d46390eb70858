//! 사각 덕트 유동 계산 및 치수 선정 모듈 모음.

pub mod friction;
pub mod hydraulics;
pub mod optimizer;

pub use friction::*;
pub use hydraulics::*;
pub use optimizer::*;
