use super::*;
use crate::foundation::core::Vec2;

fn red_source() -> SourceImage {
    SourceImage::solid(256, 256, Rgba8Premul::from_straight_rgba(255, 0, 0, 255))
}

#[test]
fn errors_are_reported_before_rendering() {
    let style = TokenStyle::investigator(64);

    let empty = SourceImage::from_rgba8_premul(0, 64, Vec::new()).unwrap();
    let err = render_token(&empty, TransformState::IDENTITY, &style).unwrap_err();
    assert!(matches!(err, TokenError::InvalidSource(_)));

    let mut bad_style = style.clone();
    bad_style.output_size = 0;
    let err = render_token(&red_source(), TransformState::IDENTITY, &bad_style).unwrap_err();
    assert!(matches!(err, TokenError::InvalidConfig(_)));

    let err = render_token(
        &red_source(),
        TransformState::new(-1.0, Vec2::ZERO),
        &style,
    )
    .unwrap_err();
    assert!(matches!(err, TokenError::InvalidTransform(_)));
}

#[test]
fn source_check_runs_first() {
    let empty = SourceImage::from_rgba8_premul(0, 0, Vec::new()).unwrap();
    let mut style = TokenStyle::investigator(64);
    style.output_size = 0;
    let err = render_token(&empty, TransformState::new(f64::NAN, Vec2::ZERO), &style).unwrap_err();
    assert!(matches!(err, TokenError::InvalidSource(_)));
}

#[test]
fn pixel_accessor_bounds() {
    let token = render_token(
        &red_source(),
        TransformState::IDENTITY,
        &TokenStyle::investigator(32),
    )
    .unwrap();
    assert_eq!(token.size(), 32);
    assert_eq!(token.rgba8_premul().len(), 32 * 32 * 4);
    assert!(token.pixel(31, 31).is_some());
    assert!(token.pixel(32, 0).is_none());
    assert!(token.pixel(0, 32).is_none());
}

#[test]
fn fingerprint_tracks_content() {
    let style = TokenStyle::investigator(64);
    let a = render_token(&red_source(), TransformState::IDENTITY, &style).unwrap();
    let b = render_token(&red_source(), TransformState::IDENTITY, &style).unwrap();
    let c = render_token(
        &red_source(),
        TransformState::IDENTITY.with_offset(Vec2::new(10.0, 0.0)),
        &TokenStyle::creature(64),
    )
    .unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn straight_copy_matches_opaque_pixels() {
    let token = render_token(
        &red_source(),
        TransformState::IDENTITY,
        &TokenStyle::investigator(64),
    )
    .unwrap();
    let straight = token.to_rgba8_straight();
    let i = (32 * 64 + 32) * 4;
    assert_eq!(&straight[i..i + 4], &token.rgba8_premul()[i..i + 4]);
    assert_eq!(&straight[0..4], &[0, 0, 0, 0]);
}

#[test]
fn render_styles_keeps_order_and_isolates_failures() {
    let mut broken = TokenStyle::creature(64);
    broken.output_size = 0;
    let styles = [
        TokenStyle::investigator(64),
        broken,
        TokenStyle::creature(48),
    ];
    let results = render_styles(&red_source(), TransformState::IDENTITY, &styles);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().size(), 64);
    assert!(matches!(results[1], Err(TokenError::InvalidConfig(_))));
    assert_eq!(results[2].as_ref().unwrap().size(), 48);

    let serial = render_token(&red_source(), TransformState::IDENTITY, &styles[2]).unwrap();
    assert_eq!(results[2].as_ref().unwrap(), &serial);
}

#[test]
fn rim_keeps_the_ring_coverage() {
    // Over a clear portrait the token is exactly the ring layer, anti-aliased rim included.
    let clear = SourceImage::solid(40, 40, Rgba8Premul::transparent());
    let style = TokenStyle::investigator(64);
    let token = render_token(&clear, TransformState::IDENTITY, &style).unwrap();
    let rings = cpu::draw_rings(&style, 64);

    let partial = rings
        .data_as_u8_slice()
        .chunks_exact(4)
        .filter(|px| px[3] > 0 && px[3] < 255)
        .count();
    assert!(partial > 0);
    assert_eq!(token.into_rgba8_premul(), rings.data_as_u8_slice());
}
