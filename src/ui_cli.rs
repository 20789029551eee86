use std::fs;
use std::io::{self, Write};

use nalgebra::Point3;

use crate::analysis::{self, AnalysisOptions, VentCase};
use crate::app::AppError;
use crate::config::{Config, UnitSystem};
use crate::conversion;
use crate::i18n::{keys, Translator};
use crate::quantity::QuantityKind;
use crate::tank::geometry::{TankOrientation, TankSpec};
use crate::tank::report::{format_report, ReportInput};
use crate::tank::streamlines::TraceOptions;
use crate::tank::ventilation;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TankSizing,
    VentAnalysis,
    UnitConversion,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_TANK_SIZING));
    println!("{}", tr.t(keys::MAIN_MENU_VENT_ANALYSIS));
    println!("{}", tr.t(keys::MAIN_MENU_UNIT_CONVERSION));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::TankSizing),
            "2" => return Ok(MenuChoice::VentAnalysis),
            "3" => return Ok(MenuChoice::UnitConversion),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 탱크 사이징 메뉴를 처리한다: 방향/치수 → 체적/필요 환기량.
pub fn handle_tank_sizing(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SIZING_HEADING));
    let spec = read_tank_spec(tr)?;
    print_sizing(tr, cfg, &spec);
    Ok(())
}

/// 환기 해석 메뉴를 처리한다: 형상 + 입출구 → 커버리지/적합성, 선택적 리포트 저장.
pub fn handle_vent_analysis(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ANALYSIS_HEADING));
    println!("{}", tr.t(keys::ANALYSIS_NOTE_BOUNDS));
    let spec = read_tank_spec(tr)?;
    print_sizing(tr, cfg, &spec);

    let half = spec.half_extents();
    println!("{}", tr.t(keys::PROMPT_INLET_COORDS));
    let inlet = read_point(tr, &half)?;
    println!("{}", tr.t(keys::PROMPT_OUTLET_COORDS));
    let outlet = read_point(tr, &half)?;

    let options = AnalysisOptions {
        trace: TraceOptions {
            jitter_sigma: cfg.unit_system.seed_jitter_sigma(),
            ..TraceOptions::default()
        },
        ..AnalysisOptions::default()
    };
    let case = VentCase {
        spec,
        inlet,
        outlet,
        options,
    };
    let result = analysis::evaluate(&case);

    println!(
        "{} {:.1} %",
        tr.t(keys::RESULT_COVERAGE),
        result.coverage * 100.0
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_STREAMLINES),
        result.streamlines.len()
    );
    if ventilation::is_compliant(result.coverage) {
        println!("{}", tr.t(keys::RESULT_COMPLIANT));
    } else {
        println!("{}", tr.t(keys::RESULT_NON_COMPLIANT));
    }

    let path = read_line(tr.t(keys::PROMPT_REPORT_PATH))?;
    let path = path.trim();
    if !path.is_empty() {
        let report = format_report(&ReportInput {
            spec: &spec,
            volume: result.volume,
            required_flow: result.required_flow,
            inlet,
            outlet,
            coverage: result.coverage,
            unit_system: cfg.unit_system,
        });
        fs::write(path, report)?;
        println!("{} {path}", tr.t(keys::REPORT_SAVED));
    }
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator, _cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Ok(n) = sel.trim().parse::<u32>() {
            if let Some(kind) = map_quantity(n) {
                break kind;
            }
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        to_unit.trim()
    );
    Ok(())
}

fn map_quantity(n: u32) -> Option<QuantityKind> {
    match n {
        1 => Some(QuantityKind::Length),
        2 => Some(QuantityKind::Volume),
        3 => Some(QuantityKind::VolumetricFlow),
        _ => None,
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {:?}",
        tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
        cfg.unit_system
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => {
            cfg.unit_system = UnitSystem::Metric;
            println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
        }
        "2" => {
            cfg.unit_system = UnitSystem::Imperial;
            println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

fn read_tank_spec(tr: &Translator) -> Result<TankSpec, AppError> {
    println!("{}", tr.t(keys::SIZING_ORIENTATION_OPTIONS));
    let orientation = loop {
        let sel = read_line(tr.t(keys::PROMPT_ORIENTATION))?;
        match sel.trim() {
            "1" => break TankOrientation::Vertical,
            "2" => break TankOrientation::Horizontal,
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let spec = match orientation {
        TankOrientation::Vertical => {
            let diameter = read_f64(tr, tr.t(keys::PROMPT_DIAMETER))?;
            let height = read_f64(tr, tr.t(keys::PROMPT_HEIGHT))?;
            TankSpec::vertical(diameter, height)?
        }
        TankOrientation::Horizontal => {
            let length = read_f64(tr, tr.t(keys::PROMPT_LENGTH))?;
            let diameter = read_f64(tr, tr.t(keys::PROMPT_DIAMETER))?;
            TankSpec::horizontal(length, diameter)?
        }
    };
    Ok(spec)
}

fn print_sizing(tr: &Translator, cfg: &Config, spec: &TankSpec) {
    let volume = spec.volume();
    println!(
        "{} {:.1} {}",
        tr.t(keys::RESULT_VOLUME),
        volume,
        cfg.unit_system.volume_label()
    );
    println!(
        "{} {:.1} {}",
        tr.t(keys::RESULT_REQUIRED_FLOW),
        ventilation::required_flow(volume),
        cfg.unit_system.flow_label()
    );
}

fn read_point(
    tr: &Translator,
    half: &nalgebra::Vector3<f64>,
) -> Result<Point3<f64>, AppError> {
    let x = read_f64(tr, tr.t(keys::PROMPT_COORD_X))?.clamp(-half.x, half.x);
    let y = read_f64(tr, tr.t(keys::PROMPT_COORD_Y))?.clamp(-half.y, half.y);
    let z = read_f64(tr, tr.t(keys::PROMPT_COORD_Z))?.clamp(-half.z, half.z);
    Ok(Point3::new(x, y, z))
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
