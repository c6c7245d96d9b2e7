use std::sync::Arc;

use crate::{
    assets::decode::DecodedImage,
    foundation::{
        color::Rgba8,
        core::{BezPath, Canvas, Circle, Point, Rect, Vec2},
    },
    text::fonts::FontSpec,
};

/// Color stop of a linear gradient; `offset` is in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f32,
    /// Straight color at this stop.
    pub color: Rgba8,
}

/// Two-point linear gradient.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Axis start (offset 0).
    pub start: Point,
    /// Axis end (offset 1).
    pub end: Point,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

/// Fill source.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Flat color.
    Solid(Rgba8),
    /// Linear gradient in canvas coordinates.
    Linear(LinearGradient),
}

/// Vertical anchoring of a text line relative to its `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// `y` is the top of the line box.
    Top,
    /// `y` is the vertical middle of the line box.
    Middle,
}

/// Blurred, offset copy of some content painted underneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow tint; its alpha scales the content coverage.
    pub color: Rgba8,
    /// Blur radius in canvas pixels.
    pub blur: f64,
    /// Offset in canvas pixels.
    pub offset: Vec2,
}

/// One drawing instruction, in canvas pixel coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill.
        paint: Paint,
    },
    /// Fill a closed path (non-zero winding).
    FillPath {
        /// Path geometry.
        path: BezPath,
        /// Fill.
        paint: Paint,
    },
    /// Stroke a path.
    StrokePath {
        /// Path geometry.
        path: BezPath,
        /// Stroke color.
        color: Rgba8,
        /// Line width in canvas pixels.
        width: f64,
    },
    /// One line of text, horizontally centered on `x`.
    Text {
        /// Line text.
        text: String,
        /// Font request.
        font: FontSpec,
        /// Fill color.
        color: Rgba8,
        /// Horizontal center.
        x: f64,
        /// Vertical anchor, see `baseline`.
        y: f64,
        /// How `y` is interpreted.
        baseline: TextBaseline,
    },
    /// Draw a decoded image stretched into `dest`, optionally clipped to a circle.
    Image {
        /// Pixels.
        image: Arc<DecodedImage>,
        /// Destination rectangle; may extend past the canvas.
        dest: Rect,
        /// Optional circular clip.
        clip: Option<Circle>,
    },
    /// Restrict following ops to `rect` until the matching [`DrawOp::PopClip`].
    PushClip {
        /// Clip rectangle.
        rect: Rect,
    },
    /// End the innermost clip.
    PopClip,
    /// Draw `ops` with a shadow underneath.
    Shadowed {
        /// Shadow parameters.
        shadow: Shadow,
        /// Content.
        ops: Vec<DrawOp>,
    },
}

impl DrawOp {
    /// Visit this op and, for groups, every nested op in drawing order.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a DrawOp)) {
        f(self);
        if let DrawOp::Shadowed { ops, .. } = self {
            for op in ops {
                op.walk(f);
            }
        }
    }

    /// Text of a [`DrawOp::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Name of the phase holding the background image or its gradient fallback.
pub const PHASE_BACKGROUND: &str = "background";
/// Name of the phase holding overlay, frame, text and logo.
pub const PHASE_COMPOSE: &str = "compose";

/// Named, independently fault-isolated group of ops.
#[derive(Clone, Debug)]
pub struct Phase {
    /// [`PHASE_BACKGROUND`] or [`PHASE_COMPOSE`].
    pub name: &'static str,
    /// Ops in drawing order.
    pub ops: Vec<DrawOp>,
}

/// Everything needed to rasterize one card.
#[derive(Clone, Debug)]
pub struct CardPlan {
    /// Target dimensions.
    pub canvas: Canvas,
    /// Phases in drawing order.
    pub phases: Vec<Phase>,
}

impl CardPlan {
    /// Phase by name.
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Every op, groups flattened, in drawing order.
    pub fn all_ops(&self) -> Vec<&DrawOp> {
        let mut out = Vec::new();
        for phase in &self.phases {
            for op in &phase.ops {
                op.walk(&mut |o| out.push(o));
            }
        }
        out
    }

    /// Every text line, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.all_ops()
            .into_iter()
            .filter_map(DrawOp::as_text)
            .collect()
    }
}

/// What kind of problem a [`Diagnostic`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An image could not be loaded and a fallback was drawn instead.
    AssetFallback,
    /// Building or rasterizing ops failed; the phase stopped early.
    DrawFailure,
}

/// A recovered problem attached to a render result.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Phase the problem occurred in.
    pub phase: &'static str,
    /// Category.
    pub kind: DiagnosticKind,
    /// Human readable cause.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn asset_fallback(phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            phase,
            kind: DiagnosticKind::AssetFallback,
            message: message.into(),
        }
    }

    pub(crate) fn draw_failure(phase: &'static str, message: impl Into<String>) -> Self {
        Self {
            phase,
            kind: DiagnosticKind::DrawFailure,
            message: message.into(),
        }
    }
}

/// Stroked or filled circle path.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    use kurbo::Shape;
    Circle::new(center, radius).to_path(0.1)
}

/// Closed polygon through `points`.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Open polyline through `points`.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
