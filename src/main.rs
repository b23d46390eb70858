use std::path::{Path, PathBuf};
use std::process::ExitCode;

use air_duct_toolbox::app::{self, AppError};
use air_duct_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use air_duct_toolbox::conversion::{parse_flow_rate_unit, parse_locked_dimension};
use air_duct_toolbox::duct::{self, DuctCalcInput, LockedDimension, SizeOptimizationRequest};
use air_duct_toolbox::units::FlowRateUnit;
use air_duct_toolbox::{batch, report, ui_cli};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "air_duct_toolbox")]
#[command(about = "사각 덕트 유속/압력손실 계산 및 치수 선정 도구", long_about = None)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,
    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 주어진 덕트 치수의 유속, 레이놀즈수, 압력손실 계산
    Calc(CalcArgs),
    /// 한 변을 고정하고 다른 변의 치수 선정
    Optimize(OptimizeArgs),
    /// TOML 시나리오 파일을 순차 계산하여 CSV 로 내보내기
    Batch {
        /// 시나리오 파일 경로
        scenarios: PathBuf,
        /// CSV 출력 경로 (생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 재질별 조도 목록 출력
    Materials,
}

#[derive(Args)]
struct AirArgs {
    /// 공기 온도 [°C]
    #[arg(long)]
    temperature: Option<f64>,
    /// 상대습도 [%]
    #[arg(long)]
    humidity: Option<f64>,
    /// 덕트 재질
    #[arg(long)]
    material: Option<String>,
}

#[derive(Args)]
struct CalcArgs {
    /// 유량
    #[arg(long)]
    flow: f64,
    /// 유량 단위 (m3/s, l/s, cfm)
    #[arg(long, value_parser = parse_flow_rate_unit)]
    unit: Option<FlowRateUnit>,
    /// 폭 [mm]
    #[arg(long)]
    width: f64,
    /// 높이 [mm]
    #[arg(long)]
    height: f64,
    #[command(flatten)]
    air: AirArgs,
}

#[derive(Args)]
struct OptimizeArgs {
    /// 유량
    #[arg(long)]
    flow: f64,
    /// 유량 단위 (m3/s, l/s, cfm)
    #[arg(long, value_parser = parse_flow_rate_unit)]
    unit: Option<FlowRateUnit>,
    /// 고정할 치수 (width 또는 height)
    #[arg(long, value_parser = parse_locked_dimension)]
    lock: LockedDimension,
    /// 고정 치수 값 [mm]
    #[arg(long)]
    locked_value: f64,
    /// 최대 유속 [m/s]
    #[arg(long)]
    max_velocity: Option<f64>,
    /// 허용 압력손실 [Pa/m]
    #[arg(long)]
    max_pressure_drop: Option<f64>,
    /// 치수 증분 [mm]
    #[arg(long)]
    increment: Option<u32>,
    #[command(flatten)]
    air: AirArgs,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_unsatisfiable() => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    match cli.command {
        None => app::run(&mut cfg),
        Some(Commands::Calc(args)) => cmd_calc(&cfg, args),
        Some(Commands::Optimize(args)) => cmd_optimize(&cfg, args),
        Some(Commands::Batch { scenarios, output }) => {
            cmd_batch(&cfg, &scenarios, output.as_deref())
        }
        Some(Commands::Materials) => {
            ui_cli::print_materials(&cfg.roughness_table());
            Ok(())
        }
    }
}

fn cmd_calc(cfg: &Config, args: CalcArgs) -> Result<(), AppError> {
    let d = &cfg.defaults;
    let input = DuctCalcInput {
        flow_rate: args.flow,
        flow_unit: args.unit.unwrap_or(d.flow_unit),
        width_mm: args.width,
        height_mm: args.height,
        temperature_c: args.air.temperature.unwrap_or(d.temperature_c),
        humidity_pct: args.air.humidity.unwrap_or(d.humidity_pct),
        material: args.air.material.unwrap_or_else(|| d.material.clone()),
    };
    let result = duct::calculate(&input, &cfg.roughness_table())?;
    print!("{}", report::format_result(&input, &result));
    Ok(())
}

fn cmd_optimize(cfg: &Config, args: OptimizeArgs) -> Result<(), AppError> {
    let d = &cfg.defaults;
    let request = SizeOptimizationRequest {
        flow_rate: args.flow,
        flow_unit: args.unit.unwrap_or(d.flow_unit),
        temperature_c: args.air.temperature.unwrap_or(d.temperature_c),
        humidity_pct: args.air.humidity.unwrap_or(d.humidity_pct),
        material: args.air.material.unwrap_or_else(|| d.material.clone()),
        locked_dimension: args.lock,
        locked_value_mm: args.locked_value,
        max_velocity_m_per_s: args.max_velocity.unwrap_or(d.max_velocity_m_per_s),
        max_pressure_drop_pa_per_m: args
            .max_pressure_drop
            .unwrap_or(d.max_pressure_drop_pa_per_m),
        size_increment_mm: args.increment.unwrap_or(d.size_increment_mm),
    };
    let result = duct::optimize(&request, &cfg.roughness_table())?;
    print!("{}", report::format_optimization(&result));
    Ok(())
}

fn cmd_batch(cfg: &Config, scenarios: &Path, output: Option<&Path>) -> Result<(), AppError> {
    let file = batch::load_batch_file(scenarios)?;
    let outcomes = batch::run_batch(&file, cfg, &cfg.roughness_table())?;
    match output {
        Some(path) => {
            report::write_csv(path, &outcomes, cfg.defaults.flow_unit)?;
            println!("CSV 저장: {}", path.display());
        }
        None => print!("{}", report::to_csv(&outcomes, cfg.defaults.flow_unit)),
    }
    for outcome in &outcomes {
        if let Err(err) = &outcome.result {
            eprintln!("시나리오 {} 실패: {err}", outcome.index);
        }
    }
    Ok(())
}
