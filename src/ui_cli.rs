use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::duct::{self, DuctCalcInput, LockedDimension, SizeOptimizationError, SizeOptimizationRequest};
use crate::material_db::RoughnessTable;
use crate::report;
use crate::units::FlowRateUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Optimize,
    Materials,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Air Duct Toolbox ===");
    println!("1) 덕트 계산 (유속/압력손실)");
    println!("2) 덕트 치수 선정");
    println!("3) 재질 조도 목록");
    println!("4) 설정");
    println!("0) 종료");
    select_menu(&mut io::stdin().lock())
}

/// 메뉴 번호를 읽는다. 입력이 끝나면 종료로 본다.
fn select_menu<R: BufRead>(input: &mut R) -> Result<MenuChoice, AppError> {
    loop {
        let sel = match read_line_from(input, "메뉴 선택: ") {
            Ok(sel) => sel,
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                return Ok(MenuChoice::Exit);
            }
            Err(err) => return Err(err),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Optimize),
            "3" => return Ok(MenuChoice::Materials),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 덕트 계산 메뉴를 처리한다.
pub fn handle_calculate(cfg: &Config, materials: &RoughnessTable) -> Result<(), AppError> {
    println!("\n-- 덕트 계산 --");
    let flow_unit = read_flow_unit(cfg.defaults.flow_unit)?;
    let flow_rate = read_f64(&format!("유량 [{flow_unit}]: "))?;
    let width_mm = read_f64("폭 [mm]: ")?;
    let height_mm = read_f64("높이 [mm]: ")?;
    let temperature_c = read_f64_or("온도 [°C]", cfg.defaults.temperature_c)?;
    let humidity_pct = read_f64_or("상대습도 [%]", cfg.defaults.humidity_pct)?;
    let material = read_material(cfg, materials)?;
    let input = DuctCalcInput {
        flow_rate,
        flow_unit,
        width_mm,
        height_mm,
        temperature_c,
        humidity_pct,
        material,
    };
    match duct::calculate(&input, materials) {
        Ok(result) => print!("{}", report::format_result(&input, &result)),
        Err(err) => println!("계산할 수 없습니다: {err}"),
    }
    Ok(())
}

/// 치수 선정 메뉴를 처리한다.
pub fn handle_optimize(cfg: &Config, materials: &RoughnessTable) -> Result<(), AppError> {
    println!("\n-- 덕트 치수 선정 --");
    let flow_unit = read_flow_unit(cfg.defaults.flow_unit)?;
    let flow_rate = read_f64(&format!("유량 [{flow_unit}]: "))?;
    let locked_dimension = loop {
        let s = read_line("고정할 치수 (w=폭, h=높이): ")?;
        match conversion::parse_locked_dimension(&s) {
            Ok(dim) => break dim,
            Err(err) => println!("{err}"),
        }
    };
    let locked_label = match locked_dimension {
        LockedDimension::Width => "폭",
        LockedDimension::Height => "높이",
    };
    let locked_value_mm = read_f64(&format!("고정 {locked_label} [mm]: "))?;
    let max_velocity_m_per_s = read_f64_or("최대 유속 [m/s]", cfg.defaults.max_velocity_m_per_s)?;
    let max_pressure_drop_pa_per_m =
        read_f64_or("허용 압력손실 [Pa/m]", cfg.defaults.max_pressure_drop_pa_per_m)?;
    let size_increment_mm = read_u32_or("치수 증분 [mm]", cfg.defaults.size_increment_mm)?;
    let temperature_c = read_f64_or("온도 [°C]", cfg.defaults.temperature_c)?;
    let humidity_pct = read_f64_or("상대습도 [%]", cfg.defaults.humidity_pct)?;
    let material = read_material(cfg, materials)?;
    let request = SizeOptimizationRequest {
        flow_rate,
        flow_unit,
        temperature_c,
        humidity_pct,
        material,
        locked_dimension,
        locked_value_mm,
        max_velocity_m_per_s,
        max_pressure_drop_pa_per_m,
        size_increment_mm,
    };
    match duct::optimize(&request, materials) {
        Ok(result) => print!("{}", report::format_optimization(&result)),
        Err(err @ SizeOptimizationError::ConstraintUnsatisfiable { .. }) => {
            println!("조건을 만족하는 치수를 찾지 못했습니다.");
            println!("{err}");
        }
        Err(err) => println!("치수를 선정할 수 없습니다: {err}"),
    }
    Ok(())
}

/// 재질별 조도 목록을 출력한다.
pub fn print_materials(materials: &RoughnessTable) {
    println!("\n-- 재질 조도 --");
    for entry in materials.entries() {
        println!("  {:<20} {:.4} mm", entry.name, entry.roughness_mm);
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- 설정 --");
    println!("엔터를 누르면 현재 값을 유지합니다.");
    let d = &mut cfg.defaults;
    d.flow_unit = read_flow_unit(d.flow_unit)?;
    let material = read_line(&format!("기본 재질 [{}]: ", d.material))?;
    if !material.trim().is_empty() {
        d.material = material.trim().to_string();
    }
    d.temperature_c = read_f64_or("기본 온도 [°C]", d.temperature_c)?;
    d.humidity_pct = read_f64_or("기본 상대습도 [%]", d.humidity_pct)?;
    d.size_increment_mm = read_u32_or("기본 치수 증분 [mm]", d.size_increment_mm)?;
    d.max_velocity_m_per_s = read_f64_or("기본 최대 유속 [m/s]", d.max_velocity_m_per_s)?;
    d.max_pressure_drop_pa_per_m =
        read_f64_or("기본 허용 압력손실 [Pa/m]", d.max_pressure_drop_pa_per_m)?;
    println!("설정을 변경했습니다.");
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 한 줄을 읽는다. 입력 스트림이 닫혔으면 `UnexpectedEof` 오류를 반환한다.
fn read_line_from<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "입력이 끝났습니다").into());
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_f64_or(label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} (기본 {default}): "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_u32_or(label: &str, default: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(&format!("{label} (기본 {default}): "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("0 이상의 정수를 입력하세요."),
        }
    }
}

fn read_flow_unit(default: FlowRateUnit) -> Result<FlowRateUnit, AppError> {
    loop {
        let s = read_line(&format!("유량 단위 m3/s, l/s, cfm (기본 {default}): "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match conversion::parse_flow_rate_unit(&s) {
            Ok(unit) => return Ok(unit),
            Err(err) => println!("{err}"),
        }
    }
}

fn read_material(cfg: &Config, materials: &RoughnessTable) -> Result<String, AppError> {
    let names: Vec<&str> = materials.entries().iter().map(|e| e.name.as_str()).collect();
    println!("재질: {}", names.join(", "));
    let s = read_line(&format!("재질 (기본 {}): ", cfg.defaults.material))?;
    if s.trim().is_empty() {
        return Ok(cfg.defaults.material.clone());
    }
    let name = s.trim().to_string();
    if materials.lookup(&name).is_none() {
        println!("등록되지 않은 재질이므로 아연도강판 조도를 사용합니다.");
    }
    Ok(name)
}
