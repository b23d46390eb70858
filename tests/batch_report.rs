//! 배치 실행과 CSV 내보내기 테스트.
use air_duct_toolbox::batch::{parse_batch, run_batch};
use air_duct_toolbox::config::Config;
use air_duct_toolbox::report::{to_csv, write_csv, DisplayRow, CSV_HEADER};
use air_duct_toolbox::units::FlowRateUnit;

const SCENARIOS: &str = r#"
[[scenario]]
flow_rate = 200
unit = "l/s"
width_mm = 300
height_mm = 250
temperature_c = 25.0
material = "Galvanized Steel"

[[scenario]]
flow_rate = 200
unit = "l/s"
width_mm = -300
height_mm = 250

[[scenario]]
flow_rate = 0.45
unit = "m3/s"
width_mm = 500
height_mm = 300
material = "Lined, Fiberglass"
"#;

#[test]
fn csv_has_exact_header_and_skips_failures() {
    let cfg = Config::default();
    let file = parse_batch(SCENARIOS).expect("parse");
    let outcomes = run_batch(&file, &cfg, &cfg.roughness_table()).expect("batch");
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[1].result.is_err());

    let csv = to_csv(&outcomes, FlowRateUnit::LiterPerSecond);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Flowrate,Width,Height,Temperature,Humidity,Material,Equivalent Diameter,Average Velocity,Pressure Drop,Reynolds Number"
    );
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("200,300,250,25,50,Galvanized Steel,272.7,2.67,0.329,"));
    assert!(lines[2].starts_with("450,500,300,"));
    assert!(lines[2].contains("\"Lined, Fiberglass\""));
}

#[test]
fn display_rounding_only_at_output() {
    let cfg = Config::default();
    let file = parse_batch(SCENARIOS).unwrap();
    let outcomes = run_batch(&file, &cfg, &cfg.roughness_table()).unwrap();
    let result = outcomes[0].result.as_ref().unwrap();
    let row = DisplayRow::from_result(result);
    assert_eq!(row.equivalent_diameter_mm, 272.7);
    assert_eq!(row.average_velocity_m_per_s, 2.67);
    assert_eq!(row.cross_sectional_area_mm2, 75_000);
    assert_eq!(row.reynolds_number, Some(result.reynolds_number.round() as i64));
    assert!(result.equivalent_diameter_mm != row.equivalent_diameter_mm);
}

#[test]
fn csv_file_is_written() {
    let cfg = Config::default();
    let outcomes = run_batch(&parse_batch(SCENARIOS).unwrap(), &cfg, &cfg.roughness_table()).unwrap();
    let path = std::env::temp_dir().join(format!("duct_batch_{}.csv", std::process::id()));
    write_csv(&path, &outcomes, FlowRateUnit::LiterPerSecond).expect("write");
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, to_csv(&outcomes, FlowRateUnit::LiterPerSecond));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn demo_scenario_file_parses() {
    let text = include_str!("../demos/scenarios.toml");
    let file = parse_batch(text).expect("demo file");
    assert_eq!(file.scenarios.len(), 4);
    let cfg = Config::default();
    let outcomes = run_batch(&file, &cfg, &cfg.roughness_table()).unwrap();
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
}

#[test]
fn mixed_unit_batch_writes_one_flow_unit() {
    let text = include_str!("../demos/scenarios.toml");
    let cfg = Config::default();
    let outcomes = run_batch(&parse_batch(text).unwrap(), &cfg, &cfg.roughness_table()).unwrap();

    let lps = to_csv(&outcomes, FlowRateUnit::LiterPerSecond);
    let flows: Vec<&str> = lps
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    // l/s, m3/s, cfm, l/s 로 입력된 파일
    assert_eq!(flows, ["200", "450", "566.3364", "80"]);

    let cms = to_csv(&outcomes, FlowRateUnit::CubicMeterPerSecond);
    assert_eq!(cms.lines().next(), Some(CSV_HEADER));
    assert!(cms.lines().nth(1).unwrap().starts_with("0.2,300,250,"));
    assert!(cms.lines().nth(2).unwrap().starts_with("0.45,500,300,"));
}
