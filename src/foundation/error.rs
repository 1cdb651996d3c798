use crate::foundation::geometry::Rect;

/// Convenience result type used across thumbplate.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Which of the two input images an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRole {
    /// The pre-designed template image.
    Template,
    /// The video frame embedded into the template.
    Frame,
}

impl std::fmt::Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template => f.write_str("template"),
            Self::Frame => f.write_str("frame"),
        }
    }
}

/// Which placement rectangle an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectRole {
    /// Source region of the frame.
    Crop,
    /// Target region inside the template.
    Location,
}

impl std::fmt::Display for RectRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crop => f.write_str("crop"),
            Self::Location => f.write_str("location"),
        }
    }
}

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// No template record exists under the requested name.
    #[error("template not found: '{name}'")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// A supplied byte stream is not a decodable image.
    #[error("decode error: {role} image: {source}")]
    Decode {
        /// Input that failed to decode.
        role: ImageRole,
        /// Underlying decoder failure.
        #[source]
        source: anyhow::Error,
    },

    /// A crop or location rectangle has no positive area.
    #[error("geometry error: {role} rectangle {rect}: {reason}")]
    Geometry {
        /// Rectangle that was rejected.
        role: RectRole,
        /// Offending rectangle as supplied.
        rect: Rect,
        /// Short human-readable cause.
        reason: String,
    },

    /// Failures inside a concrete template store (manifest parsing, missing files).
    #[error("store error: {0}")]
    Store(String),

    /// Invalid user-provided input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::NotFound`] value.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Build a [`ThumbError::Decode`] value.
    pub fn decode(role: ImageRole, source: impl Into<anyhow::Error>) -> Self {
        Self::Decode {
            role,
            source: source.into(),
        }
    }

    /// Build a [`ThumbError::Geometry`] value.
    pub fn geometry(role: RectRole, rect: Rect, reason: impl Into<String>) -> Self {
        Self::Geometry {
            role,
            rect,
            reason: reason.into(),
        }
    }

    /// Build a [`ThumbError::Store`] value.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Build a [`ThumbError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
