//! tokenforge composites circular portrait tokens for virtual tabletops.
//!
//! A token is a fixed-size square image with a circular portrait cut out of a source
//! photograph, framed by one or two decorative rings and, optionally, a darkening vignette.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: encoded bytes or a file path -> [`SourceImage`] (premultiplied RGBA8)
//! 2. **Place**: `SourceImage + TransformState -> Placement` (cover-fit, zoom, pan)
//! 3. **Render**: `SourceImage + TransformState + TokenStyle -> RenderedToken`
//! 4. **Encode**: `RenderedToken -> Vec<u8>` (PNG or lossless WebP)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure renders**: every [`render_token`] call allocates fresh surfaces, keeps no state,
//!   and produces byte-identical output for identical inputs.
//! - **No IO in the compositor**: decoding and file access live in [`decode_image`] /
//!   [`load_image`]; the renderer only sees decoded pixels.
//! - **Premultiplied RGBA8** internally; encoders un-premultiply on the way out.
//!
//! # Example
//!
//! ```no_run
//! use tokenforge::{ActorKind, TokenFormat, TransformState, encode_token, load_image, render_token};
//!
//! # fn main() -> tokenforge::TokenResult<()> {
//! let source = load_image("portrait.jpg")?;
//! let style = ActorKind::Creature.token_style(512);
//! let token = render_token(&source, TransformState::IDENTITY, &style)?;
//! let png = encode_token(&token, TokenFormat::Png)?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod editor;
mod encode;
mod foundation;
mod render;
mod style;
mod transform;

pub use assets::color::Color;
pub use assets::decode::{SourceImage, decode_image, load_image};
pub use editor::TokenEditor;
pub use encode::{TokenFormat, encode_token, token_file_name};
pub use foundation::core::{Point, Rgba8Premul, Size, Vec2};
pub use foundation::error::{TokenError, TokenResult};
pub use render::token::{RenderedToken, render_styles, render_token};
pub use style::{ActorKind, RingStyle, TokenStyle, VignetteStyle};
pub use transform::{Placement, TransformState, ZOOM_RANGE, placement};
