//! vello_cpu rasterization of the individual token layers.
//!
//! Each layer is drawn into its own fresh pixmap; layering and clipping happen afterwards in
//! [`super::composite`] so every pass stays a plain function of its inputs.

use std::{f64::consts::TAU, sync::Arc};

use vello_cpu::kurbo::{self as vk, Shape as _};

use crate::{
    assets::decode::SourceImage,
    foundation::error::TokenResult,
    style::{RingStyle, TokenStyle},
    transform::Placement,
};

const PATH_TOLERANCE: f64 = 0.05;
const MAX_PIXMAP_SIDE: u32 = u16::MAX as u32;

/// Scaled, panned source image over a transparent square.
pub(crate) fn draw_portrait(
    source: &SourceImage,
    place: &Placement,
    size: u16,
) -> TokenResult<vello_cpu::Pixmap> {
    let (pixmap, resample) = source_to_pixmap(source)?;
    let (w, h) = (f64::from(pixmap.width()), f64::from(pixmap.height()));
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let mut ctx = vello_cpu::RenderContext::new(size, size);
    ctx.set_paint_transform(vk::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(place.to_affine() * resample));
    ctx.set_paint(paint);
    ctx.fill_rect(&vk::Rect::new(0.0, 0.0, w, h));
    Ok(finish(ctx, size))
}

/// Outer ring and optional inner ring as filled annuli.
pub(crate) fn draw_rings(style: &TokenStyle, size: u16) -> vello_cpu::Pixmap {
    let center = center_of(size);
    let mut ctx = vello_cpu::RenderContext::new(size, size);
    ctx.set_paint_transform(vk::Affine::IDENTITY);
    ctx.set_transform(vk::Affine::IDENTITY);

    fill_ring(&mut ctx, center, style.outer_ring_radius(), &style.outer_ring);
    if let (Some(inner), Some(radius)) = (&style.inner_ring, style.inner_ring_radius()) {
        fill_ring(&mut ctx, center, radius, inner);
    }
    finish(ctx, size)
}

/// White disc of radius `size / 2`; its alpha is the token's clip coverage.
pub(crate) fn draw_disc_mask(size: u16) -> vello_cpu::Pixmap {
    let center = center_of(size);
    let radius = f64::from(size) / 2.0;

    let mut ctx = vello_cpu::RenderContext::new(size, size);
    ctx.set_paint_transform(vk::Affine::IDENTITY);
    ctx.set_transform(vk::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

    let mut path = vk::BezPath::new();
    for el in vk::Circle::new(center, radius).path_elements(PATH_TOLERANCE) {
        path.push(el);
    }
    ctx.fill_path(&path);
    finish(ctx, size)
}

fn fill_ring(
    ctx: &mut vello_cpu::RenderContext,
    center: vk::Point,
    radius: f64,
    ring: &RingStyle,
) {
    if ring.width <= 0.0 || ring.color.a <= 0.0 {
        return;
    }
    let [r, g, b, a] = ring.color.to_rgba8();
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_path(&annulus(
        center,
        radius + ring.width / 2.0,
        radius - ring.width / 2.0,
    ));
}

// Outer circle and inner circle wound in opposite directions so non-zero fill leaves the
// hole empty.
fn annulus(center: vk::Point, r_outer: f64, r_inner: f64) -> vk::BezPath {
    let mut path = vk::BezPath::new();
    for (radius, sweep) in [(r_outer, TAU), (r_inner, -TAU)] {
        if radius <= 0.0 {
            continue;
        }
        let arc = vk::Arc::new(center, (radius, radius), 0.0, sweep, 0.0);
        for el in arc.path_elements(PATH_TOLERANCE) {
            path.push(el);
        }
        path.close_path();
    }
    path
}

fn center_of(size: u16) -> vk::Point {
    let c = f64::from(size) / 2.0;
    vk::Point::new(c, c)
}

fn finish(mut ctx: vello_cpu::RenderContext, size: u16) -> vello_cpu::Pixmap {
    let mut pixmap = vello_cpu::Pixmap::new(size, size);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn affine_to_cpu(a: kurbo::Affine) -> vk::Affine {
    vk::Affine::new(a.as_coeffs())
}

// Pixmaps are u16-sized. Larger sources are downsampled to fit and the returned affine maps
// pixmap pixels back to source pixels, so the drawn rect is unchanged.
fn source_to_pixmap(source: &SourceImage) -> TokenResult<(vello_cpu::Pixmap, kurbo::Affine)> {
    let (w, h) = (source.width(), source.height());
    if w <= MAX_PIXMAP_SIDE && h <= MAX_PIXMAP_SIDE {
        let pixmap = premul_to_pixmap(source.rgba8_premul(), w as u16, h as u16);
        return Ok((pixmap, kurbo::Affine::IDENTITY));
    }

    let side = f64::from(MAX_PIXMAP_SIDE);
    let k = (side / f64::from(w)).min(side / f64::from(h));
    let nw = ((f64::from(w) * k).round() as u32).clamp(1, MAX_PIXMAP_SIDE);
    let nh = ((f64::from(h) * k).round() as u32).clamp(1, MAX_PIXMAP_SIDE);

    let full = image::RgbaImage::from_raw(w, h, source.rgba8_premul().to_vec())
        .ok_or_else(|| anyhow::anyhow!("source buffer does not match {w}x{h}"))?;
    let small = image::imageops::resize(&full, nw, nh, image::imageops::FilterType::Triangle);
    tracing::debug!(src_w = w, src_h = h, nw, nh, "downsampled oversized source");

    let resample = kurbo::Affine::scale_non_uniform(
        f64::from(w) / f64::from(nw),
        f64::from(h) / f64::from(nh),
    );
    Ok((
        premul_to_pixmap(small.as_raw(), nw as u16, nh as u16),
        resample,
    ))
}

fn premul_to_pixmap(rgba8_premul: &[u8], w: u16, h: u16) -> vello_cpu::Pixmap {
    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();
    vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
