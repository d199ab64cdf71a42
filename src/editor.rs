//! Interactive pan/zoom controller around [`render_token`].
//!
//! The editor only turns pointer and slider events into a [`TransformState`]; every
//! [`TokenEditor::render`] call is a full, independent render.

use crate::{
    assets::decode::SourceImage,
    encode::{TokenFormat, encode_token},
    foundation::{
        core::{Point, Vec2},
        error::TokenResult,
    },
    render::token::{RenderedToken, render_token},
    style::TokenStyle,
    transform::{TransformState, ZOOM_RANGE},
};

/// Pan/zoom session over one source image.
#[derive(Debug, Clone)]
pub struct TokenEditor {
    source: SourceImage,
    style: TokenStyle,
    transform: TransformState,
    // Pointer position minus offset at press time.
    drag_anchor: Option<Vec2>,
    current: Option<RenderedToken>,
}

impl TokenEditor {
    /// Start editing `source` with the identity transform. Nothing is rendered yet.
    pub fn new(source: SourceImage, style: TokenStyle) -> Self {
        Self {
            source,
            style,
            transform: TransformState::IDENTITY,
            drag_anchor: None,
            current: None,
        }
    }

    /// Swap in a new source image; zoom and pan reset, the last token stays visible.
    pub fn replace_source(&mut self, source: SourceImage) {
        self.source = source;
        self.transform = TransformState::IDENTITY;
        self.drag_anchor = None;
    }

    /// Change the style used by the next render.
    pub fn set_style(&mut self, style: TokenStyle) {
        self.style = style;
    }

    /// Current style.
    pub fn style(&self) -> &TokenStyle {
        &self.style
    }

    /// Current source image.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Current pan/zoom.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Begin a drag at pointer position `p` (output pixels).
    pub fn pointer_down(&mut self, p: Point) {
        self.drag_anchor = Some(p.to_vec2() - self.transform.offset);
    }

    /// Follow the pointer while dragging. Returns whether the offset changed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        let offset = p.to_vec2() - anchor;
        if !offset.is_finite() || offset == self.transform.offset {
            return false;
        }
        self.transform.offset = offset;
        true
    }

    /// End the drag; also used when the pointer leaves the token.
    pub fn pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    /// Apply a zoom slider value, clamped to [`ZOOM_RANGE`]. Non-finite values are ignored.
    /// Returns whether the scale changed.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let scale = value.clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end());
        if scale == self.transform.scale {
            return false;
        }
        self.transform.scale = scale;
        true
    }

    /// Pan directly, without a drag.
    pub fn set_offset(&mut self, offset: Vec2) {
        if offset.is_finite() {
            self.transform.offset = offset;
        }
    }

    /// Back to cover-fit, centered.
    pub fn reset_transform(&mut self) {
        self.transform = TransformState::IDENTITY;
    }

    /// Re-render from scratch with the current source, style and transform.
    ///
    /// On failure the previously rendered token is kept and remains available through
    /// [`TokenEditor::current`].
    pub fn render(&mut self) -> TokenResult<&RenderedToken> {
        match render_token(&self.source, self.transform, &self.style) {
            Ok(token) => Ok(&*self.current.insert(token)),
            Err(err) => {
                if self.current.is_some() {
                    tracing::warn!(error = %err, "render failed; keeping previous token");
                }
                Err(err)
            }
        }
    }

    /// Last successfully rendered token.
    pub fn current(&self) -> Option<&RenderedToken> {
        self.current.as_ref()
    }

    /// Encode the last successfully rendered token.
    pub fn export(&self, format: TokenFormat) -> TokenResult<Vec<u8>> {
        let token = self
            .current
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("export before any successful render"))?;
        encode_token(token, format)
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor/editor.rs"]
mod tests;
