use rayon::prelude::*;

use crate::{
    assets::decode::SourceImage,
    foundation::{
        core::{Rgba8Premul, unpremultiply_rgba8_in_place},
        error::{TokenError, TokenResult},
    },
    render::{composite, cpu},
    style::TokenStyle,
    transform::{TransformState, placement},
};

/// A finished token: `size x size` premultiplied RGBA8, transparent outside the disc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedToken {
    size: u32,
    rgba8_premul: Vec<u8>,
}

impl RenderedToken {
    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Take ownership of the premultiplied bytes.
    pub fn into_rgba8_premul(self) -> Vec<u8> {
        self.rgba8_premul
    }

    /// Pixel at `(x, y)`, or `None` outside the token.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = ((y as usize) * (self.size as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some(Rgba8Premul::from([px[0], px[1], px[2], px[3]]))
    }

    /// Straight-alpha RGBA8 copy, as written by encoders.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// xxh3 hash of the pixel bytes; equal tokens hash equal.
    pub fn fingerprint(&self) -> u64 {
        xxhash_rust::xxh3::xxh3_64_with_seed(&self.rgba8_premul, u64::from(self.size))
    }
}

/// Composite `source` into a circular token.
///
/// Layers, bottom to top: the cover-fit, zoomed and panned portrait; the vignette, if the
/// style has one; the rings. The portrait and vignette are clipped to the disc of radius
/// `output_size / 2`, and the rings never extend past it.
///
/// Sources wider or taller than 65535 px are downsampled before drawing; placement is
/// unaffected.
///
/// Every input is validated before any surface is allocated:
/// [`TokenError::InvalidSource`] for zero-area sources,
/// [`TokenError::InvalidConfig`] for bad styles, [`TokenError::InvalidTransform`] for a
/// non-finite or non-positive scale or a non-finite offset. Out-of-range zooms are rejected,
/// never clamped.
#[tracing::instrument(
    skip(source, style),
    fields(src_w = source.width(), src_h = source.height(), size = style.output_size)
)]
pub fn render_token(
    source: &SourceImage,
    transform: TransformState,
    style: &TokenStyle,
) -> TokenResult<RenderedToken> {
    if source.is_empty() {
        return Err(TokenError::invalid_source(format!(
            "source has zero area ({}x{})",
            source.width(),
            source.height()
        )));
    }
    style.validate()?;
    transform.validate()?;
    let size: u16 = style
        .output_size
        .try_into()
        .map_err(|_| TokenError::invalid_config("output_size exceeds u16"))?;

    let place = placement(source.width(), source.height(), transform, style.output_size);
    tracing::debug!(
        fit_scale = place.fit_scale,
        effective_scale = place.effective_scale,
        origin_x = place.origin.x,
        origin_y = place.origin.y,
        "placed source"
    );

    let portrait = cpu::draw_portrait(source, &place, size)?;
    let mut rgba = portrait.data_as_u8_slice().to_vec();

    if let Some(vignette) = &style.vignette {
        let layer = composite::vignette_layer(style.output_size, vignette);
        composite::over_in_place(&mut rgba, &layer)?;
    }

    let mask = cpu::draw_disc_mask(size);
    composite::mask_in_place(&mut rgba, mask.data_as_u8_slice())?;

    // Rings end at the disc edge and carry their own anti-aliasing there.
    let rings = cpu::draw_rings(style, size);
    composite::over_in_place(&mut rgba, rings.data_as_u8_slice())?;

    Ok(RenderedToken {
        size: style.output_size,
        rgba8_premul: rgba,
    })
}

/// Render the same source and transform in several styles, in parallel.
///
/// Results keep the order of `styles`; one failing style does not affect the others.
pub fn render_styles(
    source: &SourceImage,
    transform: TransformState,
    styles: &[TokenStyle],
) -> Vec<TokenResult<RenderedToken>> {
    styles
        .par_iter()
        .map(|style| render_token(source, transform, style))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/token.rs"]
mod tests;
