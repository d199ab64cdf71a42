//! User pan/zoom state and the cover-fit placement it produces.

use std::ops::RangeInclusive;

use kurbo::Affine;

use crate::foundation::{
    core::{Point, Size, Vec2},
    error::{TokenError, TokenResult},
};

/// Zoom range offered by interactive controls.
///
/// Only [`crate::TokenEditor`] clamps to it; [`crate::render_token`] accepts any finite
/// positive scale.
pub const ZOOM_RANGE: RangeInclusive<f64> = 0.2..=3.0;

/// Pan/zoom applied on top of the cover-fit placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransformState {
    /// Multiplier on the cover-fit scale; `1.0` fills the token exactly.
    pub scale: f64,
    /// Pan in output pixels (+x right, +y down). Not affected by `scale`.
    pub offset: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// Cover-fit, centered.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    /// Build a transform from a zoom and a pan.
    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Same zoom, different pan.
    pub fn with_offset(self, offset: Vec2) -> Self {
        Self { offset, ..self }
    }

    /// Same pan, different zoom.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Reject zooms that are not finite and positive, and non-finite pans.
    pub fn validate(&self) -> TokenResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TokenError::invalid_transform(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !self.offset.x.is_finite() || !self.offset.y.is_finite() {
            return Err(TokenError::invalid_transform(format!(
                "offset must be finite, got ({}, {})",
                self.offset.x, self.offset.y
            )));
        }
        Ok(())
    }
}

/// Where a source image lands on the token surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Smallest uniform scale at which the source covers the whole output square.
    pub fit_scale: f64,
    /// `fit_scale * transform.scale`.
    pub effective_scale: f64,
    /// Top-left corner of the scaled source, in output pixels.
    pub origin: Point,
    /// Size of the scaled source, in output pixels.
    pub drawn_size: Size,
}

impl Placement {
    /// Source-pixel space to output-pixel space.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.effective_scale)
    }

    /// Output position of a point given in source pixels.
    pub fn map_source_point(&self, p: Point) -> Point {
        self.to_affine() * p
    }

    /// Center of the drawn image in output pixels.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.drawn_size.width / 2.0,
            self.origin.y + self.drawn_size.height / 2.0,
        )
    }
}

/// Cover-fit placement of a `source_width x source_height` image on an
/// `output_size x output_size` surface.
///
/// The source is centered, uniformly scaled so it covers the square, zoomed by
/// `transform.scale`, then shifted by `transform.offset` in output pixels. Inputs are
/// not validated here.
pub fn placement(
    source_width: u32,
    source_height: u32,
    transform: TransformState,
    output_size: u32,
) -> Placement {
    let n = f64::from(output_size);
    let (w, h) = (f64::from(source_width), f64::from(source_height));

    let fit_scale = (n / w).max(n / h);
    let effective_scale = fit_scale * transform.scale;
    let drawn_size = Size::new(w * effective_scale, h * effective_scale);
    let origin = Point::new(
        n / 2.0 - drawn_size.width / 2.0 + transform.offset.x,
        n / 2.0 - drawn_size.height / 2.0 + transform.offset.y,
    );

    Placement {
        fit_scale,
        effective_scale,
        origin,
        drawn_size,
    }
}

#[cfg(test)]
#[path = "../tests/unit/transform/placement.rs"]
mod tests;
