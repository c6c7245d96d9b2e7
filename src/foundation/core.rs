use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

/// Side of the square design canvas every reference constant is authored against.
pub const REFERENCE_SIZE: f64 = 1024.0;

/// Pixel dimensions of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Length of the shorter side.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Geometric center.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    /// Full-canvas rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.w(), self.h())
    }

    /// Method form of [`scale_to_canvas`].
    pub fn scale(self, reference_px: f64) -> f64 {
        scale_to_canvas(reference_px, self)
    }

    /// Unrounded reference-to-canvas ratio, used for stroke widths and blur radii.
    pub fn factor(self) -> f64 {
        self.min_side() / REFERENCE_SIZE
    }

    /// Orientation derived from the aspect ratio.
    pub fn orientation(self) -> Orientation {
        match self.width.cmp(&self.height) {
            std::cmp::Ordering::Greater => Orientation::Landscape,
            std::cmp::Ordering::Less => Orientation::Portrait,
            std::cmp::Ordering::Equal => Orientation::Square,
        }
    }
}

/// Map a reference pixel constant (authored on a 1024×1024 canvas) onto `canvas`.
///
/// Uses the shorter side so that every format keeps the same proportions:
/// `round(reference_px * min(w, h) / 1024)`.
pub fn scale_to_canvas(reference_px: f64, canvas: Canvas) -> f64 {
    (reference_px * canvas.min_side() / REFERENCE_SIZE).round()
}

/// Coarse aspect classification used by the tuned per-orientation constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Width equals height.
    Square,
    /// Wider than tall.
    Landscape,
    /// Taller than wide.
    Portrait,
}

/// The three supported output aspect ratios.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CanvasFormat {
    /// 1024×1024.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 1024×576.
    #[serde(rename = "16:9")]
    Landscape,
    /// 576×1024.
    #[serde(rename = "9:16")]
    Portrait,
}

impl CanvasFormat {
    /// All formats, in declaration order.
    pub const ALL: [CanvasFormat; 3] = [Self::Square, Self::Landscape, Self::Portrait];

    /// Explicit pixel dimensions of this format.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Square => Canvas {
                width: 1024,
                height: 1024,
            },
            Self::Landscape => Canvas {
                width: 1024,
                height: 576,
            },
            Self::Portrait => Canvas {
                width: 576,
                height: 1024,
            },
        }
    }

    /// Ratio label (`"1:1"`, `"16:9"`, `"9:16"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }

    /// Parse a ratio label.
    pub fn parse(label: &str) -> CardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.label() == label.trim())
            .ok_or_else(|| CardError::validation(format!("unknown canvas format '{label}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
