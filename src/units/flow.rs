use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 m³/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    CubicMeterPerHour,
    LiterPerSecond,
    CubicFootPerHour,
    CubicFootPerMinute,
}

fn to_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerSecond => value * 3.6,
        FlowUnit::CubicFootPerHour => value * 0.0283168,
        FlowUnit::CubicFootPerMinute => value * 0.0283168 * 60.0,
    }
}

fn from_m3_per_h(value_m3h: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value_m3h,
        FlowUnit::LiterPerSecond => value_m3h / 3.6,
        FlowUnit::CubicFootPerHour => value_m3h / 0.0283168,
        FlowUnit::CubicFootPerMinute => value_m3h / (0.0283168 * 60.0),
    }
}

/// 체적 유량을 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    let m3h = to_m3_per_h(value, from);
    from_m3_per_h(m3h, to)
}
