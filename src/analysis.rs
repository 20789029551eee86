//! 입력 → 형상 → 벡터장 → 유선 → 커버리지로 이어지는 단방향 계산 파이프라인.
//!
//! UI 계층은 위젯 값을 [`VentCase`]로 묶어 [`evaluate`]를 호출하고,
//! 테스트는 같은 함수를 UI 없이 호출한다.

use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tank::flow_field::{FieldGrid, COVERAGE_THRESHOLD, DEFAULT_RESOLUTION};
use crate::tank::geometry::TankSpec;
use crate::tank::streamlines::{self, Streamline, TraceOptions};
use crate::tank::ventilation;

/// 계산 파라미터. 기본값은 해상도 25, 임계값 0.03, 시드 80개이다.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub resolution: usize,
    pub coverage_threshold: f64,
    pub trace: TraceOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            coverage_threshold: COVERAGE_THRESHOLD,
            trace: TraceOptions::default(),
        }
    }
}

/// 한 번의 평가에 필요한 전체 입력.
#[derive(Debug, Clone, Copy)]
pub struct VentCase {
    pub spec: TankSpec,
    pub inlet: Point3<f64>,
    pub outlet: Point3<f64>,
    pub options: AnalysisOptions,
}

/// 한 번의 평가 결과. 실행 간에 보존되지 않는다.
#[derive(Debug, Clone)]
pub struct VentAnalysis {
    pub volume: f64,
    pub required_flow: f64,
    pub grid: FieldGrid,
    pub streamlines: Vec<Streamline>,
    pub coverage: f64,
}

/// 주어진 난수 생성기로 케이스를 평가한다. 시드 지터 외에는 결정적이다.
pub fn evaluate_with_rng<R: Rng>(case: &VentCase, rng: &mut R) -> VentAnalysis {
    let volume = case.spec.volume();
    let required_flow = ventilation::required_flow(volume);

    let half = case.spec.half_extents();
    let grid = FieldGrid::sample(&half, &case.inlet, &case.outlet, case.options.resolution);
    let coverage = grid.coverage(case.options.coverage_threshold);

    let seeds = streamlines::seed_cloud(&case.inlet, &case.options.trace, rng);
    let streamlines = streamlines::trace(&grid, &seeds, &case.options.trace);

    VentAnalysis {
        volume,
        required_flow,
        grid,
        streamlines,
        coverage,
    }
}

/// 케이스를 평가한다. 시드 지터는 스레드 난수를 쓴다.
pub fn evaluate(case: &VentCase) -> VentAnalysis {
    evaluate_with_rng(case, &mut rand::thread_rng())
}

/// 같은 입력에 같은 결과가 필요한 곳(테스트 등)을 위한 고정 시드 평가.
pub fn evaluate_seeded(case: &VentCase, seed: u64) -> VentAnalysis {
    let mut rng = StdRng::seed_from_u64(seed);
    evaluate_with_rng(case, &mut rng)
}
