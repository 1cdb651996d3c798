//! Thumbplate composes video-frame thumbnails into pre-designed template images.
//!
//! A template is a PNG with an alpha channel plus two rectangles: `crop` (the meaningful
//! region of a frame) and `location` (where that region goes inside the template). Composing
//! a thumbnail:
//!
//! 1. **Resolve**: `TemplateStore + name -> ResolvedTemplate`, explicit overrides beating
//!    stored defaults ([`resolve`])
//! 2. **Compose**: `template + frame + crop + location -> PNG` ([`compose`]): the cropped frame
//!    is resampled into the location and shows through wherever the template is transparent
//!
//! Both steps are pure, synchronous and share no state, so independent invocations can run on
//! any number of threads ([`render_batch`]).
//!
//! The composer is written against the narrow [`ImageCodec`] seam; [`RasterCodec`] is the
//! `image`-crate implementation used by default.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;
mod template;

pub use assets::decode::{decode_rgba8, encode_png};
pub use foundation::error::{ImageRole, RectRole, ThumbError, ThumbResult};
pub use foundation::geometry::Rect;
pub use render::codec::{ImageCodec, RasterCodec, ResampleFilter};
pub use render::composite::{
    PremulRgba8, alpha_composite_in_place, over, premultiply, unpremultiply,
};
pub use render::compose::{ComposeOptions, compose, compose_with, compose_with_options};
pub use render::pipeline::{BatchItem, BatchThreading, render_batch, render_thumbnail};
pub use template::resolve::{ResolvedTemplate, resolve};
pub use template::store::{
    Manifest, ManifestEntry, ManifestTemplateStore, MemoryTemplateStore, TemplateRecord,
    TemplateStore,
};
