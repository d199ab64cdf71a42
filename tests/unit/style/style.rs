use super::*;

#[test]
fn presets_are_valid_and_distinct() {
    let inv = TokenStyle::investigator(512);
    let cre = TokenStyle::creature(512);
    inv.validate().unwrap();
    cre.validate().unwrap();

    assert_eq!(inv.outer_ring.color.to_rgba8(), [0xd4, 0xaf, 0x37, 255]);
    assert_ne!(inv.outer_ring.color, cre.outer_ring.color);
    assert!(inv.vignette.is_none());
    assert!(cre.vignette.is_some());
    assert_eq!(inv.outer_ring.width, 15.0);
}

#[test]
fn actor_kinds_map_to_presets() {
    assert_eq!(ActorKind::Character.token_style(256), TokenStyle::investigator(256));
    assert_eq!(ActorKind::Npc.token_style(256), TokenStyle::investigator(256));
    assert_eq!(ActorKind::Creature.token_style(256), TokenStyle::creature(256));
    assert_eq!(ActorKind::Creature.as_str(), "creature");
}

#[test]
fn ring_radii_sit_inside_the_edge() {
    let s = TokenStyle::investigator(512);
    assert_eq!(s.outer_ring_radius(), 256.0 - 7.5);
    let inner = s.inner_ring_radius().unwrap();
    assert!(inner < s.outer_ring_radius());
    assert_eq!(inner, 256.0 - 15.0 - 2.0);
}

#[test]
fn ring_widths_scale_with_output_size() {
    let small = TokenStyle::investigator(256);
    assert_eq!(small.outer_ring.width, 7.5);
    assert_eq!(TokenStyle::investigator(512).resized(256), small);
}

#[test]
fn validate_rejects_bad_sizes() {
    let mut s = TokenStyle::investigator(512);
    s.output_size = 0;
    assert!(matches!(s.validate(), Err(TokenError::InvalidConfig(_))));

    s.output_size = 70_000;
    assert!(matches!(s.validate(), Err(TokenError::InvalidConfig(_))));

    let mut s = TokenStyle::investigator(512);
    s.outer_ring.width = f64::NAN;
    assert!(matches!(s.validate(), Err(TokenError::InvalidConfig(_))));

    let mut s = TokenStyle::investigator(512);
    s.outer_ring.width = 300.0;
    assert!(matches!(s.validate(), Err(TokenError::InvalidConfig(_))));

    let mut s = TokenStyle::creature(512);
    s.vignette = Some(VignetteStyle {
        inner_radius: 1.5,
        ..VignetteStyle::default()
    });
    assert!(matches!(s.validate(), Err(TokenError::InvalidConfig(_))));
}

#[test]
fn json_roundtrip_and_defaults() {
    let json = TokenStyle::creature(512).to_json_pretty().unwrap();
    assert!(json.contains("\"#3b0a0a\""));
    assert_eq!(TokenStyle::from_json(&json).unwrap(), TokenStyle::creature(512));

    let minimal = r##"{ "outer_ring": { "color": "#ffffff", "width": 10 }, "vignette": {} }"##;
    let s = TokenStyle::from_json(minimal).unwrap();
    assert_eq!(s.output_size, 512);
    assert!(s.inner_ring.is_none());
    assert_eq!(s.vignette, Some(VignetteStyle::default()));
}

#[test]
fn json_errors_are_serde_or_config() {
    let err = TokenStyle::from_json(r#"{ "outer_ring": 3 }"#).unwrap_err();
    assert!(matches!(err, TokenError::Serde(_)));

    let err = TokenStyle::from_json(r##"{ "output_size": 0, "outer_ring": { "color": "#fff000", "width": 1 } }"##)
        .unwrap_err();
    assert!(matches!(err, TokenError::InvalidConfig(_)));

    let err = TokenStyle::from_json(r##"{ "outer_ring": { "color": "#fff000", "width": 1 }, "bogus": 1 }"##)
        .unwrap_err();
    assert!(matches!(err, TokenError::Serde(_)));
}
