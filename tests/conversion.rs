//! 단위 변환과 설정 직렬화 회귀 테스트.
use tank_vent_toolbox::config::{Config, UnitSystem};
use tank_vent_toolbox::conversion;
use tank_vent_toolbox::quantity::QuantityKind;

#[test]
fn meter_to_foot_exact_factor() {
    // 1 ft = 0.3048 m (정의값)
    let ft = conversion::convert(QuantityKind::Length, 0.3048, "m", "ft").unwrap();
    assert!((ft - 1.0).abs() < 1e-12);
}

#[test]
fn cubic_meter_to_cubic_foot() {
    let ft3 = conversion::convert(QuantityKind::Volume, 1.0, "m3", "ft3").unwrap();
    assert!((ft3 - 35.3147).abs() < 1e-3, "ft3={ft3}");
}

#[test]
fn flow_roundtrip_m3h_cfh() {
    let cfh = conversion::convert(QuantityKind::VolumetricFlow, 848.2, "m3/h", "cfh").unwrap();
    let back = conversion::convert(QuantityKind::VolumetricFlow, cfh, "cfh", "m3/h").unwrap();
    assert!((back - 848.2).abs() < 1e-9);
}

#[test]
fn cfm_is_sixty_cfh() {
    let cfh = conversion::convert(QuantityKind::VolumetricFlow, 1.0, "cfm", "cfh").unwrap();
    assert!((cfh - 60.0).abs() < 1e-9);
}

#[test]
fn unknown_unit_is_rejected() {
    let err = conversion::convert(QuantityKind::Length, 1.0, "furlong", "m");
    assert!(err.is_err());
}

#[test]
fn config_roundtrips_through_toml() {
    let cfg = Config {
        unit_system: UnitSystem::Imperial,
        language: "en-us".into(),
        language_pack_dir: Some("locales".into()),
    };
    let text = toml::to_string_pretty(&cfg).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.unit_system, UnitSystem::Imperial);
    assert_eq!(parsed.language, "en-us");
    assert_eq!(parsed.language_pack_dir.as_deref(), Some("locales"));
}
