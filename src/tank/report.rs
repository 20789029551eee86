use nalgebra::Point3;

use super::geometry::{TankOrientation, TankSpec};
use super::ventilation::{self, AIR_CHANGES_PER_HOUR};
use crate::config::UnitSystem;

/// 텍스트 리포트 생성에 필요한 값 모음.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub spec: &'a TankSpec,
    pub volume: f64,
    pub required_flow: f64,
    pub inlet: Point3<f64>,
    pub outlet: Point3<f64>,
    /// [0, 1] 범위의 커버리지
    pub coverage: f64,
    pub unit_system: UnitSystem,
}

/// 고정 템플릿의 평문 환기 검토 리포트를 만든다.
///
/// 좌표는 소수 2자리, 커버리지는 퍼센트 1자리로 반올림하고
/// 커버리지 85% 이상이면 COMPLIANT로 표기한다.
pub fn format_report(input: &ReportInput<'_>) -> String {
    let len = input.unit_system.length_label();
    let vol = input.unit_system.volume_label();
    let flow = input.unit_system.flow_label();

    let (kind, dim_lines) = match input.spec.orientation() {
        TankOrientation::Vertical => (
            "Vertical",
            format!(
                "Diameter         : {:.2} {len}\nHeight           : {:.2} {len}",
                input.spec.diameter(),
                input.spec.height(),
            ),
        ),
        TankOrientation::Horizontal => (
            "Horizontal",
            format!(
                "Length           : {:.2} {len}\nDiameter         : {:.2} {len}",
                input.spec.length(),
                input.spec.diameter(),
            ),
        ),
    };

    let verdict = if ventilation::is_compliant(input.coverage) {
        "COMPLIANT"
    } else {
        "NON-COMPLIANT"
    };

    format!(
        "=== C-NLOPB Tank Ventilation Report ===\n\
         \n\
         Tank type        : {kind}\n\
         {dim_lines}\n\
         Volume           : {volume:.1} {vol}\n\
         Required flow    : {required:.1} {flow} ({ach:.0} ACH)\n\
         \n\
         Inlet            : ({ix:.2}, {iy:.2}, {iz:.2}) {len}\n\
         Outlet           : ({ox:.2}, {oy:.2}, {oz:.2}) {len}\n\
         \n\
         Coverage         : {cov:.1} %\n\
         Assessment       : {verdict} (coverage threshold 85%)\n",
        volume = input.volume,
        required = input.required_flow,
        ach = AIR_CHANGES_PER_HOUR,
        ix = input.inlet.x,
        iy = input.inlet.y,
        iz = input.inlet.z,
        ox = input.outlet.x,
        oy = input.outlet.y,
        oz = input.outlet.z,
        cov = input.coverage * 100.0,
    )
}
