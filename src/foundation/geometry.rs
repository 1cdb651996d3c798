use std::str::FromStr;

use crate::foundation::error::{RectRole, ThumbError, ThumbResult};

/// Axis-aligned pixel rectangle `(left, top, right, bottom)`.
///
/// `right` and `bottom` are exclusive. Well-formed rectangles satisfy `left < right` and
/// `top < bottom`; degenerate ones are representable and only rejected where a positive size
/// is actually needed (see [`Rect::resize_target`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i64,
    /// Top edge (inclusive).
    pub top: i64,
    /// Right edge (exclusive).
    pub right: i64,
    /// Bottom edge (exclusive).
    pub bottom: i64,
}

impl Rect {
    /// Build a rectangle from its four edges.
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// `right - left`, saturating at the `i64` range; zero or negative for degenerate rectangles.
    pub fn width(self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top`, saturating at the `i64` range; zero or negative for degenerate rectangles.
    pub fn height(self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    /// Top-left corner.
    pub fn origin(self) -> (i64, i64) {
        (self.left, self.top)
    }

    /// True when the rectangle has no positive area.
    pub fn is_degenerate(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Pixel size of the rectangle, or a [`ThumbError::Geometry`] naming `role`.
    pub fn resize_target(self, role: RectRole) -> ThumbResult<(u32, u32)> {
        let (Some(w), Some(h)) = (
            self.right.checked_sub(self.left),
            self.bottom.checked_sub(self.top),
        ) else {
            return Err(ThumbError::geometry(role, self, "coordinates overflow"));
        };
        if w <= 0 {
            return Err(ThumbError::geometry(
                role,
                self,
                format!("non-positive width {w}"),
            ));
        }
        if h <= 0 {
            return Err(ThumbError::geometry(
                role,
                self,
                format!("non-positive height {h}"),
            ));
        }
        let w = u32::try_from(w)
            .map_err(|_| ThumbError::geometry(role, self, format!("width {w} too large")))?;
        let h = u32::try_from(h)
            .map_err(|_| ThumbError::geometry(role, self, format!("height {h} too large")))?;
        Ok((w, h))
    }

    /// Parse an optional override; blank text means "no override".
    ///
    /// Supplying an empty value is treated exactly like not supplying one, so callers fall
    /// back to the stored default in both cases.
    pub fn parse_override(s: &str) -> ThumbResult<Option<Self>> {
        if s.trim().is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl From<[i64; 4]> for Rect {
    fn from([left, top, right, bottom]: [i64; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Rect> for [i64; 4] {
    fn from(r: Rect) -> Self {
        [r.left, r.top, r.right, r.bottom]
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl FromStr for Rect {
    type Err = ThumbError;

    /// Accepts `l,t,r,b`, optionally wrapped in `()` or `[]`, with free whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|x| x.strip_suffix(')'))
            .or_else(|| inner.strip_prefix('[').and_then(|x| x.strip_suffix(']')))
            .unwrap_or(inner);

        let parts = inner
            .split(',')
            .map(|p| {
                p.trim().parse::<i64>().map_err(|e| {
                    ThumbError::validation(format!("rectangle '{s}': bad coordinate '{p}': {e}"))
                })
            })
            .collect::<ThumbResult<Vec<_>>>()?;

        let coords: [i64; 4] = parts.try_into().map_err(|v: Vec<i64>| {
            ThumbError::validation(format!(
                "rectangle '{s}': expected 4 coordinates (left,top,right,bottom), got {}",
                v.len()
            ))
        })?;
        Ok(coords.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
