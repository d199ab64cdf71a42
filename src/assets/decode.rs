use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::{Rgba8Premul, premultiply_rgba8_in_place},
    error::{TokenError, TokenResult},
};

/// An immutable decoded bitmap in premultiplied RGBA8, row-major.
///
/// Clones share the pixel buffer, so one source can feed any number of renders
/// (including parallel ones) without copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap premultiplied RGBA8 pixels.
    ///
    /// Zero-area images are accepted here; [`crate::render_token`] rejects them.
    pub fn from_rgba8_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> TokenResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| TokenError::invalid_source("image dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(TokenError::invalid_source(format!(
                "expected {expected} bytes for {width}x{height} rgba8, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_rgba8_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> TokenResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_rgba8_premul(width, height, rgba8)
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(px.repeat(len)),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied RGBA8 bytes.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some(Rgba8Premul::from([px[0], px[1], px[2], px[3]]))
    }
}

/// Decode encoded image bytes (any format the `image` crate reads) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> TokenResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, "decoded source image");
    SourceImage::from_rgba8_straight(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> TokenResult<SourceImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|err| match err {
        TokenError::Other(e) => {
            TokenError::Other(e.context(format!("decode image '{}'", path.display())))
        }
        err => err,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
