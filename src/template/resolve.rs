use crate::{
    foundation::error::{ThumbError, ThumbResult},
    foundation::geometry::Rect,
    template::store::TemplateStore,
};

/// Template image plus the effective crop/location for one composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Encoded template image as stored.
    pub image: Vec<u8>,
    /// Override if supplied, otherwise the stored default.
    pub crop: Rect,
    /// Override if supplied, otherwise the stored default.
    pub location: Rect,
}

/// Fetch template `name` from `store`, letting explicit overrides win over stored defaults.
///
/// Each override applies independently. An override of `None` means "use the stored value";
/// text-level callers map blank input to `None` through [`Rect::parse_override`].
#[tracing::instrument(skip(store))]
pub fn resolve<S: TemplateStore + ?Sized>(
    store: &S,
    name: &str,
    crop_override: Option<Rect>,
    location_override: Option<Rect>,
) -> ThumbResult<ResolvedTemplate> {
    if name.is_empty() {
        return Err(ThumbError::validation("template name must be non-empty"));
    }

    let record = store
        .get_template_by_name(name)?
        .ok_or_else(|| ThumbError::not_found(name))?;

    Ok(ResolvedTemplate {
        image: record.image,
        crop: crop_override.unwrap_or(record.crop),
        location: location_override.unwrap_or(record.location),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/template/resolve.rs"]
mod tests;
