use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let src = decode_image(&buf).unwrap();
    assert_eq!(src.width(), 1);
    assert_eq!(src.height(), 1);
    assert_eq!(
        src.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_an_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, TokenError::Other(_)));
}

#[test]
fn load_image_reports_missing_path() {
    let err = load_image("target/definitely/missing.png").unwrap_err();
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn from_rgba8_premul_checks_length() {
    let err = SourceImage::from_rgba8_premul(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, TokenError::InvalidSource(_)));

    let ok = SourceImage::from_rgba8_premul(2, 2, vec![0; 16]).unwrap();
    assert!(!ok.is_empty());
}

#[test]
fn zero_area_source_is_constructible_but_empty() {
    let src = SourceImage::from_rgba8_premul(0, 10, Vec::new()).unwrap();
    assert!(src.is_empty());
    assert_eq!(src.pixel(0, 0), None);
}

#[test]
fn solid_fills_every_pixel() {
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let src = SourceImage::solid(3, 2, red);
    assert_eq!(src.rgba8_premul().len(), 3 * 2 * 4);
    assert_eq!(src.pixel(2, 1), Some(red));
    assert_eq!(src.pixel(3, 0), None);
}

#[test]
fn clones_share_pixels() {
    let src = SourceImage::solid(4, 4, Rgba8Premul::transparent());
    let copy = src.clone();
    assert!(std::ptr::eq(src.rgba8_premul(), copy.rgba8_premul()));
}
