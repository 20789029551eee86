use nalgebra::Point3;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::flow_field::FieldGrid;

/// 입구 주변에 뿌리는 시드 점 개수 기본값.
pub const SEED_COUNT: usize = 80;

/// 유선 적분 시간 예산 기본값 (무차원).
pub const MAX_TIME: f64 = 50.0;

/// 적분 스텝 크기 기본값.
pub const STEP_DT: f64 = 0.1;

/// 속도 크기가 이 값보다 작으면 정체로 보고 적분을 끝낸다.
const STAGNATION_SPEED: f64 = 1e-10;

/// 유선 추적 옵션.
#[derive(Debug, Clone, Copy)]
pub struct TraceOptions {
    pub seed_count: usize,
    /// 시드 지터의 가우시안 표준편차 (길이 단위)
    pub jitter_sigma: f64,
    pub max_time: f64,
    pub dt: f64,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            seed_count: SEED_COUNT,
            jitter_sigma: 0.05,
            max_time: MAX_TIME,
            dt: STEP_DT,
        }
    }
}

/// 벡터장을 따라 적분한 유선 하나. 점과 각 점에서의 속도 크기를 함께 담는다.
#[derive(Debug, Clone)]
pub struct Streamline {
    pub points: Vec<Point3<f64>>,
    pub speeds: Vec<f64>,
}

/// 입구 위치에 성분별 독립 가우시안 지터를 더한 시드 점 구름을 만든다.
pub fn seed_cloud<R: Rng>(inlet: &Point3<f64>, opts: &TraceOptions, rng: &mut R) -> Vec<Point3<f64>> {
    let normal = match Normal::new(0.0, opts.jitter_sigma.max(0.0)) {
        Ok(n) => n,
        Err(_) => return vec![*inlet; opts.seed_count],
    };
    (0..opts.seed_count)
        .map(|_| {
            Point3::new(
                inlet.x + normal.sample(rng),
                inlet.y + normal.sample(rng),
                inlet.z + normal.sample(rng),
            )
        })
        .collect()
}

/// 각 시드에서 벡터장을 RK4로 전방 적분해 유선을 만든다.
///
/// 유선은 격자 영역을 벗어나거나, 속도가 정체 수준으로 떨어지거나,
/// 시간 예산을 다 쓰면 끝난다. 시드가 영역 밖이면 한 점짜리 유선이 된다.
pub fn trace(grid: &FieldGrid, seeds: &[Point3<f64>], opts: &TraceOptions) -> Vec<Streamline> {
    let steps = if opts.dt > 0.0 {
        (opts.max_time / opts.dt).ceil() as usize
    } else {
        0
    };

    seeds
        .iter()
        .map(|seed| trace_single(grid, *seed, steps, opts.dt))
        .collect()
}

fn trace_single(grid: &FieldGrid, seed: Point3<f64>, steps: usize, dt: f64) -> Streamline {
    let mut points = Vec::with_capacity(steps.min(256) + 1);
    let mut speeds = Vec::with_capacity(steps.min(256) + 1);
    let mut current = seed;

    let v0 = grid.velocity_at(&current);
    points.push(current);
    speeds.push(v0.norm());

    if !grid.contains(&current) {
        return Streamline { points, speeds };
    }

    for _ in 0..steps {
        let k1 = grid.velocity_at(&current);
        if k1.norm() < STAGNATION_SPEED {
            break;
        }
        let p2 = current + k1 * (dt / 2.0);
        let k2 = grid.velocity_at(&p2);
        let p3 = current + k2 * (dt / 2.0);
        let k3 = grid.velocity_at(&p3);
        let p4 = current + k3 * dt;
        let k4 = grid.velocity_at(&p4);

        let dp = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
        current += dp;

        if !grid.contains(&current) {
            break;
        }
        points.push(current);
        speeds.push(grid.velocity_at(&current).norm());
    }

    Streamline { points, speeds }
}
