use nalgebra::Point3;

/// 원점을 바라보는 궤도 카메라. 요/피치 회전 후 정사영한다.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    /// Z축 기준 회전 [rad]
    pub yaw: f64,
    /// 화면 수평축 기준 기울임 [rad]
    pub pitch: f64,
    pub zoom: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: -0.6,
            pitch: 0.45,
            zoom: 1.0,
        }
    }
}

impl OrbitCamera {
    /// 월드 좌표를 화면 평면 좌표와 깊이로 투영한다.
    ///
    /// 반환값은 ([수평, 수직], 깊이)이고 수직축은 월드 +Z가 위쪽이다.
    pub fn project(&self, p: &Point3<f64>) -> ([f64; 2], f64) {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        // Z축(요) 회전
        let x1 = p.x * cy - p.y * sy;
        let y1 = p.x * sy + p.y * cy;
        let z1 = p.z;

        // 화면 수평축(피치) 회전
        let y2 = y1 * cp - z1 * sp;
        let z2 = y1 * sp + z1 * cp;

        ([x1 * self.zoom, z2 * self.zoom], y2)
    }

    /// 드래그 델타를 요/피치 회전으로 반영한다. 피치는 뒤집히지 않게 제한한다.
    pub fn rotate_by(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            -std::f64::consts::FRAC_PI_2 + 0.01,
            std::f64::consts::FRAC_PI_2 - 0.01,
        );
    }

    /// 스크롤 양에 따라 줌 배율을 곱으로 조정한다.
    pub fn zoom_by(&mut self, scroll: f64) {
        let factor = (scroll * 0.1).exp();
        self.zoom = (self.zoom * factor).clamp(0.1, 10.0);
    }
}
