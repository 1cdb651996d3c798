use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_blends() {
    // 50% white over opaque black -> mid grey, opaque.
    let dst = [0, 0, 0, 255];
    let src = premultiply([255, 255, 255, 128]);
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
}

#[test]
fn premultiply_edges() {
    assert_eq!(premultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply([9, 8, 7, 255]), [9, 8, 7, 255]);
    assert_eq!(
        premultiply([100, 50, 200, 128]),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn unpremultiply_is_close_inverse() {
    let straight = [200, 100, 50, 180];
    let back = unpremultiply(premultiply(straight));
    for i in 0..3 {
        assert!((i16::from(back[i]) - i16::from(straight[i])).abs() <= 1);
    }
    assert_eq!(back[3], 180);
}

#[test]
fn composite_in_place_respects_template_alpha() {
    let mut dst = RgbaImage::from_pixel(2, 1, image::Rgba([0, 255, 0, 255]));
    let mut src = RgbaImage::new(2, 1);
    src.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    src.put_pixel(1, 0, image::Rgba([255, 0, 0, 0]));

    alpha_composite_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [0, 255, 0, 255]);
}

#[test]
fn composite_in_place_rejects_size_mismatch() {
    let mut dst = RgbaImage::new(2, 2);
    let src = RgbaImage::new(3, 2);
    assert!(matches!(
        alpha_composite_in_place(&mut dst, &src),
        Err(ThumbError::Validation(_))
    ));
}

#[test]
fn transparent_source_keeps_partial_alpha_dst_exact() {
    let mut dst = RgbaImage::new(2, 1);
    dst.put_pixel(0, 0, image::Rgba([200, 100, 50, 3]));
    dst.put_pixel(1, 0, image::Rgba([17, 34, 51, 90]));
    let src = RgbaImage::from_pixel(2, 1, image::Rgba([0, 0, 0, 0]));

    alpha_composite_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst.get_pixel(0, 0).0, [200, 100, 50, 3]);
    assert_eq!(dst.get_pixel(1, 0).0, [17, 34, 51, 90]);
}

#[test]
fn opaque_source_replaces_partial_alpha_dst() {
    let mut dst = RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 50, 3]));
    let src = RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));

    alpha_composite_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst.get_pixel(0, 0).0, [1, 2, 3, 255]);
}
