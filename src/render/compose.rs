use crate::{
    foundation::error::{ImageRole, RectRole, ThumbResult},
    foundation::geometry::Rect,
    render::codec::{ImageCodec, RasterCodec, ResampleFilter},
};

/// Knobs for [`compose_with_options`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Filter used to scale the cropped frame to the location size.
    pub filter: ResampleFilter,
}

/// Compose a thumbnail with the default [`RasterCodec`] (Lanczos3 resampling).
///
/// `template` and `frame` are encoded image bytes; the result is PNG bytes with alpha, sized
/// exactly like the template.
pub fn compose(template: &[u8], frame: &[u8], crop: Rect, location: Rect) -> ThumbResult<Vec<u8>> {
    compose_with(&RasterCodec::default(), template, frame, crop, location)
}

/// [`compose`] with explicit [`ComposeOptions`].
pub fn compose_with_options(
    template: &[u8],
    frame: &[u8],
    crop: Rect,
    location: Rect,
    opts: ComposeOptions,
) -> ThumbResult<Vec<u8>> {
    compose_with(
        &RasterCodec::with_filter(opts.filter),
        template,
        frame,
        crop,
        location,
    )
}

/// Compose a thumbnail against an arbitrary [`ImageCodec`].
///
/// Steps, in order:
/// 1. decode template and frame
/// 2. derive the location size
/// 3. start from a fully transparent canvas the size of the template
/// 4. crop the frame to `crop` and resample it to the location size
/// 5. paste it (straight copy) at the location's top-left corner
/// 6. composite the template over the canvas, so the frame only shows through the
///    template's transparent areas
/// 7. encode as PNG
///
/// Rectangles are not bounds-checked against the images: a crop reaching past the frame
/// yields transparent padding, a location reaching past the template is clipped. Rectangles
/// without positive area fail with [`ThumbError::Geometry`](crate::ThumbError::Geometry).
#[tracing::instrument(skip(codec, template, frame), fields(template_len = template.len(), frame_len = frame.len()))]
pub fn compose_with<C: ImageCodec>(
    codec: &C,
    template: &[u8],
    frame: &[u8],
    crop: Rect,
    location: Rect,
) -> ThumbResult<Vec<u8>> {
    let template = codec.decode(template, ImageRole::Template)?;
    let frame = codec.decode(frame, ImageRole::Frame)?;

    let (template_w, template_h) = codec.dimensions(&template);
    let mut result = codec.blank(template_w, template_h);

    crop.resize_target(RectRole::Crop)?;
    let (loc_w, loc_h) = location.resize_target(RectRole::Location)?;
    tracing::debug!(
        template_w,
        template_h,
        loc_w,
        loc_h,
        "placing cropped frame into template"
    );

    let placed = codec.resize(&codec.crop(&frame, crop), loc_w, loc_h);
    let (x, y) = location.origin();
    codec.paste(&mut result, &placed, x, y);

    codec.alpha_composite(&mut result, &template)?;
    codec.encode(&result)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
