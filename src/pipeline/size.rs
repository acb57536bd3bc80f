//! Size specification grammar.
//!
//! Three forms are accepted:
//!
//! | Literal | Meaning |
//! |---|---|
//! | `WxH` | fit inside a W×H box, aspect ratio preserved |
//! | `WxH!` | exactly W×H, aspect ratio ignored |
//! | `N%` | scale both sides by N/100 |
//!
//! The pipeline carries the raw string untouched; the transformer parses it
//! when it needs the geometry, so a malformed spec surfaces as a resize error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizeSpecError {
    #[error("empty size specification")]
    Empty,
    #[error("invalid size specification {0:?}: expected WxH, WxH! or N%")]
    Malformed(String),
    #[error("invalid size specification {0:?}: dimensions must be greater than zero")]
    ZeroDimension(String),
    #[error("invalid size specification {0:?}: percentage must be greater than zero")]
    NonPositiveScale(String),
}

/// Unparsed size parameter as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec(String);

impl SizeSpec {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn geometry(&self) -> Result<Geometry, SizeSpecError> {
        self.0.parse()
    }
}

impl std::fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed size transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Fit { width: u32, height: u32 },
    Exact { width: u32, height: u32 },
    Scale { percent: f64 },
}

impl std::str::FromStr for Geometry {
    type Err = SizeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SizeSpecError::Empty);
        }
        let malformed = || SizeSpecError::Malformed(s.to_string());

        if let Some(pct) = s.strip_suffix('%') {
            let percent: f64 = pct.parse().map_err(|_| malformed())?;
            if !percent.is_finite() {
                return Err(malformed());
            }
            if percent <= 0.0 {
                return Err(SizeSpecError::NonPositiveScale(s.to_string()));
            }
            return Ok(Geometry::Scale { percent });
        }

        let (dims, exact) = match s.strip_suffix('!') {
            Some(d) => (d, true),
            None => (s, false),
        };
        let (w, h) = dims.split_once(['x', 'X']).ok_or_else(malformed)?;
        let width = parse_side(w).ok_or_else(malformed)?;
        let height = parse_side(h).ok_or_else(malformed)?;
        if width == 0 || height == 0 {
            return Err(SizeSpecError::ZeroDimension(s.to_string()));
        }

        Ok(if exact {
            Geometry::Exact { width, height }
        } else {
            Geometry::Fit { width, height }
        })
    }
}

fn parse_side(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Geometry {
    /// Target dimensions for a source of `src_w`×`src_h`. Every side is at
    /// least one pixel.
    pub fn target_dimensions(&self, src_w: u32, src_h: u32) -> (u32, u32) {
        match *self {
            Geometry::Exact { width, height } => (width, height),
            Geometry::Fit { width, height } => {
                if src_w == 0 || src_h == 0 {
                    return (width, height);
                }
                let ratio = f64::min(
                    width as f64 / src_w as f64,
                    height as f64 / src_h as f64,
                );
                (scale_side(src_w, ratio), scale_side(src_h, ratio))
            }
            Geometry::Scale { percent } => {
                let ratio = percent / 100.0;
                (scale_side(src_w, ratio), scale_side(src_h, ratio))
            }
        }
    }
}

fn scale_side(side: u32, ratio: f64) -> u32 {
    let scaled = (side as f64 * ratio).round();
    scaled.clamp(1.0, u32::MAX as f64) as u32
}
