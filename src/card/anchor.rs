use crate::{
    catalog::model::FrameStyle,
    foundation::core::{Canvas, Point},
};

/// Bottom-right logo diameter, reference pixels.
pub const LOGO_SIZE: f64 = 80.0;
/// Distance from the right edge to the bottom-right logo center.
pub const LOGO_MARGIN_RIGHT: f64 = 90.0;
/// Distance from the bottom edge to the bottom-right logo center.
pub const LOGO_MARGIN_BOTTOM: f64 = 70.0;
/// Clearance between the logo edge and the frame cutout.
pub const LOGO_CUTOUT_PADDING: f64 = 15.0;

/// Top-right logo diameter, reference pixels.
pub const BANNER_LOGO_SIZE: f64 = 70.0;
/// Distance from the top and right edges to the top-right logo box.
pub const BANNER_LOGO_MARGIN: f64 = 30.0;
/// Backing disc overhang around the top-right logo.
pub const BANNER_LOGO_BACKING: f64 = 5.0;

/// Where the logo sits for a given frame style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoPlacement {
    /// Default corner; rectangular frames cut around it.
    BottomRight,
    /// Banner styles; drawn on a white backing disc.
    TopRight,
}

impl LogoPlacement {
    /// Placement used by `style`.
    pub fn for_style(style: FrameStyle) -> Self {
        if style.is_banner() {
            Self::TopRight
        } else {
            Self::BottomRight
        }
    }
}

/// Logo center, keep-out radius and drawn diameter, in canvas pixels.
///
/// The frame cutout and the logo compositor both read this value; neither recomputes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoAnchor {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Keep-out radius (bottom-right) or backing disc radius (top-right).
    pub radius: f64,
    /// Drawn logo diameter.
    pub size: f64,
    /// Placement this anchor was computed for.
    pub placement: LogoPlacement,
}

impl LogoAnchor {
    /// Compute the anchor for `placement` on `canvas`.
    pub fn compute(canvas: Canvas, placement: LogoPlacement) -> Self {
        match placement {
            LogoPlacement::BottomRight => {
                let size = canvas.scale(LOGO_SIZE);
                Self {
                    x: canvas.w() - canvas.scale(LOGO_MARGIN_RIGHT),
                    y: canvas.h() - canvas.scale(LOGO_MARGIN_BOTTOM),
                    radius: canvas.scale(LOGO_SIZE / 2.0 + LOGO_CUTOUT_PADDING),
                    size,
                    placement,
                }
            }
            LogoPlacement::TopRight => {
                let size = canvas.scale(BANNER_LOGO_SIZE);
                let inset = canvas.scale(BANNER_LOGO_MARGIN + BANNER_LOGO_SIZE / 2.0);
                Self {
                    x: canvas.w() - inset,
                    y: inset,
                    radius: canvas.scale(BANNER_LOGO_SIZE / 2.0 + BANNER_LOGO_BACKING),
                    size,
                    placement,
                }
            }
        }
    }

    /// Anchor for `style` on `canvas`.
    pub fn for_style(canvas: Canvas, style: FrameStyle) -> Self {
        Self::compute(canvas, LogoPlacement::for_style(style))
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/anchor.rs"]
mod tests;
