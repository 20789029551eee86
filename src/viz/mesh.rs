use nalgebra::Point3;
use std::f64::consts::PI;

use crate::tank::geometry::TankOrientation;

/// 원주 분할 수 기본값.
pub const DEFAULT_SEGMENTS: usize = 40;

/// 폴리라인 목록으로 표현한 와이어프레임.
#[derive(Debug, Clone)]
pub struct Wireframe {
    pub polylines: Vec<Vec<Point3<f64>>>,
}

/// 원통 와이어프레임을 만든다.
///
/// 축은 Vertical이면 +Z, Horizontal이면 +X이고 중심은 원점이다.
/// 양 끝 림과 중간 링, 그리고 4개의 축 방향 레일로 구성된다.
pub fn cylinder_wireframe(
    radius: f64,
    axis_length: f64,
    orientation: TankOrientation,
    segments: usize,
) -> Wireframe {
    let segments = segments.max(3);
    let half = axis_length / 2.0;
    let mut polylines = Vec::new();

    // 축상 위치 u, 원주각 theta의 표면 점
    let surface_point = |u: f64, theta: f64| -> Point3<f64> {
        let (a, b) = (radius * theta.cos(), radius * theta.sin());
        match orientation {
            TankOrientation::Vertical => Point3::new(a, b, u),
            TankOrientation::Horizontal => Point3::new(u, a, b),
        }
    };

    for u in [-half, 0.0, half] {
        let mut ring = Vec::with_capacity(segments + 1);
        for s in 0..=segments {
            let theta = s as f64 / segments as f64 * 2.0 * PI;
            ring.push(surface_point(u, theta));
        }
        polylines.push(ring);
    }

    for s in 0..4 {
        let theta = s as f64 / 4.0 * 2.0 * PI;
        polylines.push(vec![surface_point(-half, theta), surface_point(half, theta)]);
    }

    Wireframe { polylines }
}
