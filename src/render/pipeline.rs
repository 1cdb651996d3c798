use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::error::{ThumbError, ThumbResult},
    foundation::geometry::Rect,
    render::compose::{ComposeOptions, compose_with_options},
    template::resolve::resolve,
    template::store::TemplateStore,
};

/// Resolve template `name` from `store`, then compose `frame` into it.
///
/// This is the primary one-shot API: the result is PNG bytes sized like the template.
pub fn render_thumbnail<S: TemplateStore + ?Sized>(
    store: &S,
    name: &str,
    frame: &[u8],
    crop_override: Option<Rect>,
    location_override: Option<Rect>,
    opts: ComposeOptions,
) -> ThumbResult<Vec<u8>> {
    let resolved = resolve(store, name, crop_override, location_override)?;
    compose_with_options(
        &resolved.image,
        frame,
        resolved.crop,
        resolved.location,
        opts,
    )
}

/// Thread settings for [`render_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchThreading {
    /// Override rayon worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// One finished thumbnail from a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    /// Template the frame was composed into.
    pub name: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

/// Compose one frame into several stored templates in parallel.
///
/// Every template is an independent invocation of [`render_thumbnail`] with stored defaults.
/// Results come back in the order of `names`; the first failure (in that order) fails the batch.
#[tracing::instrument(skip(store, names, frame), fields(templates = names.len()))]
pub fn render_batch<S: TemplateStore + Sync + ?Sized>(
    store: &S,
    names: &[String],
    frame: &[u8],
    opts: ComposeOptions,
    threading: &BatchThreading,
) -> ThumbResult<Vec<BatchItem>> {
    if names.is_empty() {
        return Err(ThumbError::validation(
            "batch render needs at least one template name",
        ));
    }

    let pool = build_thread_pool(threading.threads)?;
    let rendered = pool.install(|| {
        names
            .par_iter()
            .map(|name| -> ThumbResult<BatchItem> {
                let png = render_thumbnail(store, name, frame, None, None, opts)?;
                Ok(BatchItem {
                    name: name.clone(),
                    png,
                })
            })
            .collect::<Vec<_>>()
    });

    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ThumbResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ThumbError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon thread pool")?)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
