use super::*;
use crate::assets::color::Color;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_black_on_white_is_grey() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out, [127, 127, 127, 255]);
}

#[test]
fn in_place_ops_reject_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(mask_in_place(&mut dst, &[0u8; 12]).is_err());
    assert!(mask_in_place(&mut [0u8; 6], &[0u8; 6]).is_err());
}

#[test]
fn mask_scales_by_coverage() {
    let mut dst = vec![200u8, 100, 50, 255, 200, 100, 50, 255, 200, 100, 50, 255];
    let mask = [0u8, 0, 0, 255, 0, 0, 0, 0, 255, 255, 255, 128];
    mask_in_place(&mut dst, &mask).unwrap();
    assert_eq!(&dst[0..4], &[200, 100, 50, 255]);
    assert_eq!(&dst[4..8], &[0, 0, 0, 0]);
    assert_eq!(&dst[8..12], &[100, 50, 25, 128]);
}

#[test]
fn vignette_is_clear_in_the_middle_and_full_past_the_rim() {
    let style = VignetteStyle {
        inner_radius: 0.5,
        color: Color::rgba8(0, 0, 0, 200),
    };
    let size = 64u32;
    let layer = vignette_layer(size, &style);
    let px = |x: u32, y: u32| {
        let i = ((y * size + x) * 4) as usize;
        [layer[i], layer[i + 1], layer[i + 2], layer[i + 3]]
    };

    assert_eq!(px(32, 32), [0, 0, 0, 0]);
    assert_eq!(px(40, 32), [0, 0, 0, 0]);
    assert_eq!(px(0, 0), [0, 0, 0, 200]);

    // Alpha grows monotonically along a radius.
    let alphas: Vec<u8> = (32..64).map(|x| px(x, 32)[3]).collect();
    assert!(alphas.windows(2).all(|w| w[0] <= w[1]), "{alphas:?}");
    assert!(alphas[alphas.len() - 1] > 150);
}
