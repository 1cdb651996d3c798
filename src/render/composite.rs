use image::RgbaImage;

use crate::foundation::error::{ThumbError, ThumbResult};

/// One RGBA8 pixel with color channels already multiplied by alpha.
pub type PremulRgba8 = [u8; 4];

/// Source-over on premultiplied pixels: `out = src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Straight RGBA8 to premultiplied.
pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = px[3];
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let a16 = u16::from(a);
            [
                mul_div255(u16::from(px[0]), a16),
                mul_div255(u16::from(px[1]), a16),
                mul_div255(u16::from(px[2]), a16),
                a,
            ]
        }
    }
}

/// Premultiplied RGBA8 back to straight; fully transparent pixels become `[0, 0, 0, 0]`.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = px[3];
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let a32 = u32::from(a);
            let un = |c: u8| ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), a]
        }
    }
}

/// Composite `src` over `dst` in place. Both buffers hold straight-alpha RGBA8.
pub fn alpha_composite_in_place(dst: &mut RgbaImage, src: &RgbaImage) -> ThumbResult<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(ThumbError::validation(format!(
            "alpha composite expects equal-size buffers, got {:?} and {:?}",
            dst.dimensions(),
            src.dimensions()
        )));
    }
    // Fully transparent source pixels leave `dst` bit-exact.
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        match s.0[3] {
            0 => {}
            255 => *d = *s,
            _ => d.0 = unpremultiply(over(premultiply(d.0), premultiply(s.0))),
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
