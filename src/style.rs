//! Token styles: output size, ring borders and vignette, with presets per subject category.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    assets::color::Color,
    foundation::error::{TokenError, TokenResult},
};

/// Canonical token edge length in pixels.
pub const DEFAULT_OUTPUT_SIZE: u32 = 512;

/// One decorative ring stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in output pixels.
    pub width: f64,
    /// Space between this ring and the ring (or edge) outside it, in output pixels.
    #[serde(default)]
    pub gap: f64,
}

/// Radial darkening toward the rim.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VignetteStyle {
    /// Fraction of the token radius where the fade starts (fully transparent inside).
    #[serde(default = "default_vignette_inner")]
    pub inner_radius: f64,
    /// Color reached at the rim, alpha included.
    #[serde(default = "default_vignette_color")]
    pub color: Color,
}

fn default_vignette_inner() -> f64 {
    0.65
}

fn default_vignette_color() -> Color {
    Color::rgba8(0, 0, 0, 140)
}

impl Default for VignetteStyle {
    fn default() -> Self {
        Self {
            inner_radius: default_vignette_inner(),
            color: default_vignette_color(),
        }
    }
}

/// Everything about a token render that does not depend on the source or the user's pan/zoom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenStyle {
    /// Edge length of the square output, in pixels.
    #[serde(default = "default_output_size")]
    pub output_size: u32,
    /// Thick ring drawn flush with the token edge.
    pub outer_ring: RingStyle,
    /// Optional thinner ring inside the outer one.
    #[serde(default)]
    pub inner_ring: Option<RingStyle>,
    /// Optional rim darkening, drawn under the rings.
    #[serde(default)]
    pub vignette: Option<VignetteStyle>,
}

fn default_output_size() -> u32 {
    DEFAULT_OUTPUT_SIZE
}

impl Default for TokenStyle {
    fn default() -> Self {
        Self::investigator(DEFAULT_OUTPUT_SIZE)
    }
}

// Ring widths are authored against a 512 px token and scale with the output.
fn px(size: u32, at_512: f64) -> f64 {
    f64::from(size) * at_512 / 512.0
}

impl TokenStyle {
    /// Gold-framed preset for investigators and other human subjects.
    pub fn investigator(output_size: u32) -> Self {
        Self {
            output_size,
            outer_ring: RingStyle {
                color: Color::rgb8(0xd4, 0xaf, 0x37),
                width: px(output_size, 15.0),
                gap: 0.0,
            },
            inner_ring: Some(RingStyle {
                color: Color::rgb8(0x5c, 0x45, 0x1c),
                width: px(output_size, 4.0),
                gap: 0.0,
            }),
            vignette: None,
        }
    }

    /// Dark red preset for monsters and other non-human subjects.
    pub fn creature(output_size: u32) -> Self {
        Self {
            output_size,
            outer_ring: RingStyle {
                color: Color::rgb8(0x3b, 0x0a, 0x0a),
                width: px(output_size, 15.0),
                gap: 0.0,
            },
            inner_ring: Some(RingStyle {
                color: Color::rgb8(0xb3, 0x12, 0x12),
                width: px(output_size, 4.0),
                gap: px(output_size, 2.0),
            }),
            vignette: Some(VignetteStyle::default()),
        }
    }

    /// Parse a style from JSON. Missing optional fields take their defaults.
    pub fn from_json(json: &str) -> TokenResult<Self> {
        let style: Self =
            serde_json::from_str(json).map_err(|e| TokenError::serde(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Read and parse a JSON style file.
    pub fn from_path(path: impl AsRef<Path>) -> TokenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open style '{}'", path.display()))?;
        let style: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| TokenError::serde(format!("parse style '{}': {e}", path.display())))?;
        style.validate()?;
        Ok(style)
    }

    /// Pretty JSON, suitable for [`TokenStyle::from_json`].
    pub fn to_json_pretty(&self) -> TokenResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TokenError::serde(e.to_string()))
    }

    /// Same style at a different output size, ring geometry scaled to match.
    pub fn resized(&self, output_size: u32) -> Self {
        let k = f64::from(output_size) / f64::from(self.output_size.max(1));
        let scale_ring = |r: RingStyle| RingStyle {
            width: r.width * k,
            gap: r.gap * k,
            ..r
        };
        Self {
            output_size,
            outer_ring: scale_ring(self.outer_ring),
            inner_ring: self.inner_ring.map(scale_ring),
            vignette: self.vignette,
        }
    }

    /// Token radius in pixels.
    pub fn radius(&self) -> f64 {
        f64::from(self.output_size) / 2.0
    }

    /// Centerline radius of the outer ring.
    pub fn outer_ring_radius(&self) -> f64 {
        self.radius() - self.outer_ring.width / 2.0
    }

    /// Centerline radius of the inner ring, if there is one.
    pub fn inner_ring_radius(&self) -> Option<f64> {
        self.inner_ring
            .map(|inner| self.radius() - self.outer_ring.width - inner.gap - inner.width / 2.0)
    }

    /// Check sizes and geometry before any pixels are allocated.
    pub fn validate(&self) -> TokenResult<()> {
        if self.output_size == 0 {
            return Err(TokenError::invalid_config("output_size must be > 0"));
        }
        if self.output_size > u32::from(u16::MAX) {
            return Err(TokenError::invalid_config(format!(
                "output_size must be <= {}, got {}",
                u16::MAX,
                self.output_size
            )));
        }

        validate_ring("outer_ring", &self.outer_ring)?;
        if let Some(inner) = &self.inner_ring {
            validate_ring("inner_ring", inner)?;
            if self.inner_ring_radius().is_some_and(|r| r - inner.width / 2.0 < 0.0) {
                return Err(TokenError::invalid_config(
                    "rings are wider than the token radius",
                ));
            }
        }
        if self.outer_ring.width > self.radius() {
            return Err(TokenError::invalid_config(
                "outer_ring.width exceeds the token radius",
            ));
        }

        if let Some(v) = &self.vignette {
            if !v.inner_radius.is_finite() || !(0.0..1.0).contains(&v.inner_radius) {
                return Err(TokenError::invalid_config(format!(
                    "vignette.inner_radius must be in [0, 1), got {}",
                    v.inner_radius
                )));
            }
            if !v.color.is_finite() {
                return Err(TokenError::invalid_config("vignette.color must be finite"));
            }
        }
        Ok(())
    }
}

fn validate_ring(name: &str, ring: &RingStyle) -> TokenResult<()> {
    if !ring.width.is_finite() || ring.width < 0.0 {
        return Err(TokenError::invalid_config(format!(
            "{name}.width must be finite and >= 0, got {}",
            ring.width
        )));
    }
    if !ring.gap.is_finite() || ring.gap < 0.0 {
        return Err(TokenError::invalid_config(format!(
            "{name}.gap must be finite and >= 0, got {}",
            ring.gap
        )));
    }
    if !ring.color.is_finite() {
        return Err(TokenError::invalid_config(format!(
            "{name}.color must be finite"
        )));
    }
    Ok(())
}

/// Subject categories of a character sheet; each maps to a token preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A player character (investigator).
    Character,
    /// A non-player human.
    Npc,
    /// A monster or other non-human entity.
    Creature,
}

impl ActorKind {
    /// Preset style for this category.
    pub fn token_style(self, output_size: u32) -> TokenStyle {
        match self {
            Self::Character | Self::Npc => TokenStyle::investigator(output_size),
            Self::Creature => TokenStyle::creature(output_size),
        }
    }

    /// Lowercase name, as used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Npc => "npc",
            Self::Creature => "creature",
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/style/style.rs"]
mod tests;
