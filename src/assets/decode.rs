use std::io::Cursor;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{ImageRole, ThumbError, ThumbResult};

/// Decode encoded image bytes in any format `image` supports and promote them to straight RGBA8.
pub fn decode_rgba8(bytes: &[u8], role: ImageRole) -> ThumbResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .with_context(|| format!("decode {role} image from memory ({} bytes)", bytes.len()))
        .map_err(|e| ThumbError::decode(role, e))?;
    Ok(dyn_img.to_rgba8())
}

/// Encode a straight-alpha RGBA8 buffer as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> ThumbResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
