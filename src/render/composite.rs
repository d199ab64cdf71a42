//! Per-pixel passes over premultiplied RGBA8 buffers.

use crate::{
    foundation::error::{TokenError, TokenResult},
    style::VignetteStyle,
};

pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> TokenResult<()> {
    check_same_len("over_in_place", dst, src)?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every pixel of `dst` by the alpha of the matching `mask` pixel.
pub(crate) fn mask_in_place(dst: &mut [u8], mask: &[u8]) -> TokenResult<()> {
    check_same_len("mask_in_place", dst, mask)?;
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let coverage = u16::from(m[3]);
        match coverage {
            255 => {}
            0 => d.fill(0),
            _ => {
                for c in d.iter_mut() {
                    *c = mul_div255(u16::from(*c), coverage);
                }
            }
        }
    }
    Ok(())
}

/// Radial fade from transparent at `inner_radius * R` to `vignette.color` at `R`, sampled at
/// pixel centers. Pixels beyond `R` get the full color; the disc mask removes them later.
pub(crate) fn vignette_layer(size: u32, vignette: &VignetteStyle) -> Vec<u8> {
    let color = vignette.color.to_rgba8_premul().to_array();
    let n = size as usize;
    let radius = f64::from(size) / 2.0;
    let start = vignette.inner_radius.clamp(0.0, 1.0);
    let span = (1.0 - start).max(f64::EPSILON);

    let mut bytes = vec![0u8; n * n * 4];
    for y in 0..n {
        let dy = (y as f64 + 0.5 - radius) / radius;
        for x in 0..n {
            let dx = (x as f64 + 0.5 - radius) / radius;
            let d = (dx * dx + dy * dy).sqrt();
            let t = ((d - start) / span).clamp(0.0, 1.0);
            if t <= 0.0 {
                continue;
            }
            let idx = (y * n + x) * 4;
            for (out, &c) in bytes[idx..idx + 4].iter_mut().zip(&color) {
                *out = (f64::from(c) * t).round() as u8;
            }
        }
    }
    bytes
}

fn check_same_len(op: &str, dst: &[u8], src: &[u8]) -> TokenResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TokenError::Other(anyhow::anyhow!(
            "{op} expects equal-length rgba8 buffers ({} vs {})",
            dst.len(),
            src.len()
        )));
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
