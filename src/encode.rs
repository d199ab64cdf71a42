//! Token export: lossless encoders and download file names.

use std::{fmt, io::Cursor, str::FromStr};

use crate::{
    foundation::error::{TokenError, TokenResult},
    render::token::RenderedToken,
};

/// Output encodings. Both keep the alpha channel around the circular cutout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// PNG.
    #[default]
    Png,
    /// Lossless WebP.
    WebP,
}

impl TokenFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// MIME type for downloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TokenFormat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            other => Err(TokenError::invalid_config(format!(
                "unsupported token format \"{other}\" (expected png or webp)"
            ))),
        }
    }
}

/// Encode a rendered token. Pixels are un-premultiplied first.
#[tracing::instrument(skip(token), fields(size = token.size()))]
pub fn encode_token(token: &RenderedToken, format: TokenFormat) -> TokenResult<Vec<u8>> {
    let size = token.size();
    let img = image::RgbaImage::from_raw(size, size, token.to_rgba8_straight())
        .ok_or_else(|| TokenError::encode("token buffer does not match its size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format.image_format())
        .map_err(|e| TokenError::encode(format!("{format}: {e}")))?;
    tracing::debug!(bytes = buf.len(), "encoded token");
    Ok(buf)
}

/// Download file name for a subject: its display name with path-hostile characters replaced,
/// or `token.<ext>` when the name is blank.
pub fn token_file_name(display_name: &str, format: TokenFormat) -> String {
    let stem: String = display_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { "token" } else { stem };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
#[path = "../tests/unit/encode/encode.rs"]
mod tests;
