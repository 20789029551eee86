//! 탱크 형상/환기량 공식 회귀 테스트.
use tank_vent_toolbox::tank::geometry::{TankOrientation, TankSpec};
use tank_vent_toolbox::tank::ventilation::{self, AIR_CHANGES_PER_HOUR};

#[test]
fn vertical_volume_formula() {
    // π·1.5²·10 ≈ 70.6858
    let spec = TankSpec::vertical(3.0, 10.0).expect("valid spec");
    assert!((spec.volume() - 70.6858).abs() < 1e-3, "vol={}", spec.volume());
}

#[test]
fn horizontal_volume_formula() {
    // π·2²·15 ≈ 188.4956
    let spec = TankSpec::horizontal(15.0, 4.0).expect("valid spec");
    assert!(
        (spec.volume() - 188.4956).abs() < 1e-3,
        "vol={}",
        spec.volume()
    );
}

#[test]
fn required_flow_is_exactly_twelve_volumes() {
    assert_eq!(AIR_CHANGES_PER_HOUR, 12.0);
    assert_eq!(ventilation::required_flow(2.5), 30.0);
    assert_eq!(ventilation::required_flow(0.0), 0.0);

    let spec = TankSpec::vertical(3.0, 10.0).expect("valid spec");
    assert_eq!(ventilation::required_flow(spec.volume()), spec.volume() * 12.0);
}

#[test]
fn orientation_mirrors_dimensions() {
    let vertical = TankSpec::vertical(2.0, 7.5).expect("valid spec");
    assert_eq!(vertical.length(), vertical.height());
    assert_eq!(vertical.orientation(), TankOrientation::Vertical);

    let horizontal = TankSpec::horizontal(12.0, 3.5).expect("valid spec");
    assert_eq!(horizontal.height(), horizontal.diameter());
    assert_eq!(horizontal.orientation(), TankOrientation::Horizontal);
}

#[test]
fn non_positive_dimensions_rejected() {
    assert!(TankSpec::vertical(0.0, 10.0).is_err());
    assert!(TankSpec::vertical(3.0, -1.0).is_err());
    assert!(TankSpec::horizontal(-5.0, 4.0).is_err());
    assert!(TankSpec::horizontal(15.0, 0.0).is_err());
}

#[test]
fn half_extents_cover_tank_envelope() {
    let vertical = TankSpec::vertical(3.0, 10.0).expect("valid spec");
    let half = vertical.half_extents();
    assert_eq!((half.x, half.y, half.z), (1.5, 1.5, 5.0));

    let horizontal = TankSpec::horizontal(15.0, 4.0).expect("valid spec");
    let half = horizontal.half_extents();
    assert_eq!((half.x, half.y, half.z), (7.5, 2.0, 2.0));
}

#[test]
fn compliance_threshold_boundary() {
    assert!(ventilation::is_compliant(0.85));
    assert!(ventilation::is_compliant(1.0));
    assert!(!ventilation::is_compliant(0.8499));
}
