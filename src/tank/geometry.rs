use nalgebra::Vector3;

/// 원통형 탱크의 설치 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankOrientation {
    /// 축이 수직(Z)인 탱크
    Vertical,
    /// 축이 수평(X)인 탱크
    Horizontal,
}

/// 탱크 형상 계산 오류를 표현한다.
#[derive(Debug)]
pub enum GeometryError {
    /// 치수가 0 이하인 경우
    NonPositiveDimension(&'static str),
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::NonPositiveDimension(msg) => write!(f, "치수 오류: {msg}"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// 원통형 탱크 사양.
///
/// 방향에 따라 치수 미러링 불변식을 유지한다:
/// Vertical ⇒ length == height, Horizontal ⇒ height == diameter.
/// 생성자를 통해서만 만들 수 있고, 치수는 사용하는 단위계의 길이 단위로 해석한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankSpec {
    orientation: TankOrientation,
    diameter: f64,
    length: f64,
    height: f64,
}

impl TankSpec {
    /// 수직 탱크를 생성한다. length는 height로 미러링된다.
    pub fn vertical(diameter: f64, height: f64) -> Result<Self, GeometryError> {
        if diameter <= 0.0 {
            return Err(GeometryError::NonPositiveDimension(
                "직경은 0보다 커야 합니다.",
            ));
        }
        if height <= 0.0 {
            return Err(GeometryError::NonPositiveDimension(
                "높이는 0보다 커야 합니다.",
            ));
        }
        Ok(Self {
            orientation: TankOrientation::Vertical,
            diameter,
            length: height,
            height,
        })
    }

    /// 수평 탱크를 생성한다. height는 diameter로 미러링된다.
    pub fn horizontal(length: f64, diameter: f64) -> Result<Self, GeometryError> {
        if length <= 0.0 {
            return Err(GeometryError::NonPositiveDimension(
                "길이는 0보다 커야 합니다.",
            ));
        }
        if diameter <= 0.0 {
            return Err(GeometryError::NonPositiveDimension(
                "직경은 0보다 커야 합니다.",
            ));
        }
        Ok(Self {
            orientation: TankOrientation::Horizontal,
            diameter,
            length,
            height: diameter,
        })
    }

    pub fn orientation(&self) -> TankOrientation {
        self.orientation
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// 원통 축 방향의 치수. Vertical이면 height, Horizontal이면 length.
    pub fn axis_length(&self) -> f64 {
        match self.orientation {
            TankOrientation::Vertical => self.height,
            TankOrientation::Horizontal => self.length,
        }
    }

    /// 탱크 체적: π·(D/2)²·축 길이.
    pub fn volume(&self) -> f64 {
        let radius = self.diameter / 2.0;
        std::f64::consts::PI * radius * radius * self.axis_length()
    }

    /// 탱크 외접 직육면체의 절반 크기.
    ///
    /// Vertical: (D/2, D/2, H/2), Horizontal: (L/2, D/2, D/2).
    pub fn half_extents(&self) -> Vector3<f64> {
        let r = self.diameter / 2.0;
        match self.orientation {
            TankOrientation::Vertical => Vector3::new(r, r, self.height / 2.0),
            TankOrientation::Horizontal => Vector3::new(self.length / 2.0, r, r),
        }
    }
}
