use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    error::{ThumbError, ThumbResult},
    geometry::Rect,
};

/// One stored template: encoded image plus default placement rectangles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Encoded template image (PNG with alpha in practice).
    pub image: Vec<u8>,
    /// Default source region of the frame.
    pub crop: Rect,
    /// Default target region inside the template.
    pub location: Rect,
}

/// Read-only lookup of templates by unique name.
///
/// Implementations perform a single read per call and never mutate what they store.
pub trait TemplateStore {
    /// Fetch the record named `name`, or `Ok(None)` if there is none.
    fn get_template_by_name(&self, name: &str) -> ThumbResult<Option<TemplateRecord>>;
}

impl<S: TemplateStore + ?Sized> TemplateStore for &S {
    fn get_template_by_name(&self, name: &str) -> ThumbResult<Option<TemplateRecord>> {
        (**self).get_template_by_name(name)
    }
}

/// In-memory store, mainly for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, TemplateRecord>,
}

impl MemoryTemplateStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `name`.
    pub fn insert(&mut self, name: impl Into<String>, record: TemplateRecord) {
        self.templates.insert(name.into(), record);
    }

    /// Stored names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn get_template_by_name(&self, name: &str) -> ThumbResult<Option<TemplateRecord>> {
        Ok(self.templates.get(name).cloned())
    }
}

/// On-disk manifest entry; `image` is relative to the manifest's directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Relative path of the template image.
    pub image: String,
    /// Default crop rectangle, `[left, top, right, bottom]`.
    pub crop: Rect,
    /// Default location rectangle, `[left, top, right, bottom]`.
    pub location: Rect,
}

/// Top-level manifest document.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Templates keyed by unique name.
    pub templates: BTreeMap<String, ManifestEntry>,
}

/// Template store backed by a JSON manifest plus image files next to it.
///
/// ```json
/// {
///   "templates": {
///     "standard": { "image": "templates/standard.png",
///                   "crop": [50, 100, 1870, 980], "location": [320, 180, 1600, 900] }
///   }
/// }
/// ```
///
/// Image bytes are read from disk on each lookup, never cached.
#[derive(Clone, Debug)]
pub struct ManifestTemplateStore {
    root: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

#[derive(Clone, Debug)]
struct StoredEntry {
    image: PathBuf,
    crop: Rect,
    location: Rect,
}

impl ManifestTemplateStore {
    /// Load the manifest at `path`; images resolve against its parent directory.
    pub fn open(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read template manifest '{}'", path.display()))?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_json(&text, root)
    }

    /// Parse manifest JSON; `root` is the directory image paths are relative to.
    pub fn from_json(json: &str, root: impl Into<PathBuf>) -> ThumbResult<Self> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|e| ThumbError::store(format!("parse template manifest: {e}")))?;
        Self::from_manifest(manifest, root)
    }

    /// Build from an already parsed [`Manifest`], validating names and image paths.
    ///
    /// Names double as output file stems, so they may not contain path separators or be `.`/`..`.
    /// Image paths must stay inside `root`.
    pub fn from_manifest(manifest: Manifest, root: impl Into<PathBuf>) -> ThumbResult<Self> {
        let mut entries = BTreeMap::new();
        for (name, entry) in manifest.templates {
            check_template_name(&name)?;
            let image = image_path_under_root(&name, &entry.image)?;
            entries.insert(
                name,
                StoredEntry {
                    image,
                    crop: entry.crop,
                    location: entry.location,
                },
            );
        }
        Ok(Self {
            root: root.into(),
            entries,
        })
    }

    /// Template names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Directory image paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, rel: &Path) -> ThumbResult<Vec<u8>> {
        let path = self.root.join(rel);
        std::fs::read(&path)
            .with_context(|| format!("read template image from '{}'", path.display()))
            .map_err(ThumbError::from)
    }
}

impl TemplateStore for ManifestTemplateStore {
    fn get_template_by_name(&self, name: &str) -> ThumbResult<Option<TemplateRecord>> {
        let Some(entry) = self.entries.get(name) else {
            return Ok(None);
        };
        let image = self.read_bytes(&entry.image)?;
        Ok(Some(TemplateRecord {
            image,
            crop: entry.crop,
            location: entry.location,
        }))
    }
}

fn check_template_name(name: &str) -> ThumbResult<()> {
    if name.is_empty() {
        return Err(ThumbError::store("template names must be non-empty"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(ThumbError::store(format!(
            "template name '{name}' must not contain path separators or be '.'/'..'"
        )));
    }
    Ok(())
}

// Backslashes count as separators so manifests written on Windows load everywhere.
fn image_path_under_root(name: &str, source: &str) -> ThumbResult<PathBuf> {
    let unified = source.replace('\\', "/");
    let mut rel = PathBuf::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ThumbError::store(format!(
                    "template '{name}': image path '{source}' must stay inside the manifest directory"
                )));
            }
        }
    }
    if rel.as_os_str().is_empty() {
        return Err(ThumbError::store(format!(
            "template '{name}': image path '{source}' names no file"
        )));
    }
    Ok(rel)
}

#[cfg(test)]
#[path = "../../tests/unit/template/store.rs"]
mod tests;
