use image::{Rgba, RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::{decode_rgba8, encode_png},
    foundation::error::{ImageRole, ThumbResult},
    foundation::geometry::Rect,
    render::composite::{alpha_composite_in_place, premultiply, unpremultiply},
};

/// Image operations the thumbnail composer is written against.
///
/// The composer only ever sees these primitives, so it can be driven by a recording fake in
/// tests or by a different imaging library without touching the composition order.
pub trait ImageCodec {
    /// Decoded, 4-channel pixel buffer.
    type Image;

    /// Decode encoded bytes, promoting to 4 channels.
    fn decode(&self, bytes: &[u8], role: ImageRole) -> ThumbResult<Self::Image>;

    /// `(width, height)` in pixels.
    fn dimensions(&self, img: &Self::Image) -> (u32, u32);

    /// Fully transparent buffer (all channels zero).
    fn blank(&self, width: u32, height: u32) -> Self::Image;

    /// Extract `rect` from `img`. `rect` is already known to have positive size.
    fn crop(&self, img: &Self::Image, rect: Rect) -> Self::Image;

    /// Resample `img` to exactly `width` x `height`.
    fn resize(&self, img: &Self::Image, width: u32, height: u32) -> Self::Image;

    /// Overwrite `dst` with `src` placed at `(x, y)`, clipping at the edges of `dst`.
    fn paste(&self, dst: &mut Self::Image, src: &Self::Image, x: i64, y: i64);

    /// Source-over composite `src` on top of `dst`; both have the same size.
    fn alpha_composite(&self, dst: &mut Self::Image, src: &Self::Image) -> ThumbResult<()>;

    /// Encode as PNG with alpha.
    fn encode(&self, img: &Self::Image) -> ThumbResult<Vec<u8>>;
}

/// Resampling filter used when scaling the cropped frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResampleFilter {
    /// Lanczos with window 3; highest quality.
    #[default]
    Lanczos3,
    /// Cubic Catmull-Rom.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Linear (triangle).
    Triangle,
    /// Nearest neighbour.
    Nearest,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::Nearest => FilterType::Nearest,
        }
    }
}

/// [`ImageCodec`] backed by the `image` crate, operating on straight-alpha RGBA8.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterCodec {
    /// Filter used by [`ImageCodec::resize`].
    pub filter: ResampleFilter,
}

impl RasterCodec {
    /// Codec with an explicit resampling filter.
    pub fn with_filter(filter: ResampleFilter) -> Self {
        Self { filter }
    }
}

impl ImageCodec for RasterCodec {
    type Image = RgbaImage;

    fn decode(&self, bytes: &[u8], role: ImageRole) -> ThumbResult<RgbaImage> {
        decode_rgba8(bytes, role)
    }

    fn dimensions(&self, img: &RgbaImage) -> (u32, u32) {
        img.dimensions()
    }

    fn blank(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
    }

    // Areas of `rect` outside the source come out transparent.
    fn crop(&self, img: &RgbaImage, rect: Rect) -> RgbaImage {
        let w = u32::try_from(rect.width()).unwrap_or(0);
        let h = u32::try_from(rect.height()).unwrap_or(0);
        let mut out = self.blank(w, h);
        // `i64::MIN` has no negation; saturating still lands the source far outside `out`.
        image::imageops::replace(
            &mut out,
            img,
            rect.left.saturating_neg(),
            rect.top.saturating_neg(),
        );
        out
    }

    // Resampling happens on premultiplied pixels so transparent colors do not bleed.
    fn resize(&self, img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        if img.dimensions() == (width, height) {
            return img.clone();
        }
        let mut premul = img.clone();
        for px in premul.pixels_mut() {
            px.0 = premultiply(px.0);
        }
        let mut out = image::imageops::resize(&premul, width, height, self.filter.into());
        for px in out.pixels_mut() {
            px.0 = unpremultiply(px.0);
        }
        out
    }

    fn paste(&self, dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
        image::imageops::replace(dst, src, x, y);
    }

    fn alpha_composite(&self, dst: &mut RgbaImage, src: &RgbaImage) -> ThumbResult<()> {
        alpha_composite_in_place(dst, src)
    }

    fn encode(&self, img: &RgbaImage) -> ThumbResult<Vec<u8>> {
        encode_png(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/codec.rs"]
mod tests;
