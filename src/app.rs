use crate::batch::BatchError;
use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::duct::{DuctCalcError, SizeOptimizationError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 문자열 해석 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 덕트 계산 오류
    #[error("덕트 계산 오류: {0}")]
    Duct(#[from] DuctCalcError),
    /// 치수 선정 오류
    #[error("치수 선정 오류: {0}")]
    Optimization(#[from] SizeOptimizationError),
    /// 배치 처리 오류
    #[error("배치 처리 오류: {0}")]
    Batch(#[from] BatchError),
}

impl AppError {
    /// 조건을 완화하면 해결되는 치수 선정 실패인지 여부.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(
            self,
            AppError::Optimization(SizeOptimizationError::ConstraintUnsatisfiable { .. })
        )
    }
}

/// 대화형 메뉴의 메인 루프를 실행한다.
pub fn run(config: &mut Config) -> Result<(), AppError> {
    let materials = config.roughness_table();
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Calculate => ui_cli::handle_calculate(config, &materials)?,
            MenuChoice::Optimize => ui_cli::handle_optimize(config, &materials)?,
            MenuChoice::Materials => ui_cli::print_materials(&materials),
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("프로그램을 종료합니다.");
                break;
            }
        }
    }
    Ok(())
}
