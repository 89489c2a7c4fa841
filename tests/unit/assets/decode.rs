use std::io::Cursor;

use super::*;
use crate::foundation::core::Size;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.size(), Size::new(1, 1));
    assert_eq!(
        prepared.as_premul_rgba8(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_sniffs_content_not_names() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Bmp)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.size(), Size::new(3, 2));
    assert_eq!(decoded.pixel(2, 1), Some([10, 20, 30, 255]));
}

#[test]
fn decode_svg_rasterizes_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="3">
        <rect width="4" height="3" fill="#ff0000"/>
    </svg>"##;
    let decoded = decode_image(svg).unwrap();
    assert_eq!(decoded.size(), Size::new(4, 3));
    assert_eq!(decoded.pixel(1, 1), Some([255, 0, 0, 255]));
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"definitely not an image").is_err());
    assert!(decode_image(&[]).is_err());
}
