use std::io::Cursor;

use super::*;

fn encode_as(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let bytes = encode_as(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let decoded = decode_rgba8(&bytes, ImageRole::Template).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100, 50, 200, 128]);
}

#[test]
fn decode_rgb_promotes_to_opaque_rgba() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let bytes = encode_as(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Bmp);

    let decoded = decode_rgba8(&bytes, ImageRole::Frame).unwrap();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert!(decoded.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn garbage_bytes_fail_with_role() {
    let err = decode_rgba8(b"definitely not an image", ImageRole::Frame).unwrap_err();
    assert!(matches!(
        err,
        ThumbError::Decode {
            role: ImageRole::Frame,
            ..
        }
    ));
}

#[test]
fn encode_png_has_signature_and_alpha() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]));
    let bytes = encode_png(&img).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let back = image::load_from_memory(&bytes).unwrap();
    assert_eq!(back.color(), image::ColorType::Rgba8);
    assert_eq!(back.to_rgba8(), img);
}
