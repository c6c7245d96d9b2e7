//! Decorative frame geometry, one function per [`FrameStyle`].

use crate::{
    card::anchor::LogoAnchor,
    catalog::model::FrameStyle,
    compose::plan::{
        DrawOp, GradientStop, LinearGradient, Paint, TextBaseline, circle_path, polygon_path,
        polyline_path,
    },
    foundation::{
        color::Rgba8,
        core::{BezPath, Canvas, Orientation, Point, Rect},
    },
    text::fonts::{DEFAULT_SERIF, FontSpec},
};

/// Banner band height, reference pixels.
pub const BANNER_HEIGHT: f64 = 100.0;
/// Banner label size, reference pixels.
pub const BANNER_LABEL_SIZE: f64 = 52.0;

/// Band color and label of one banner variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BannerSpec {
    /// Band fill.
    pub band: Rgba8,
    /// Label text.
    pub label: &'static str,
    /// Label color.
    pub label_color: Rgba8,
}

const LABEL_YELLOW: Rgba8 = Rgba8::rgb(0xff, 0xd6, 0x0a);

const BANNER_SIMPLE: BannerSpec = BannerSpec {
    band: Rgba8::rgb(0x2d, 0x6a, 0x4f),
    label: "#UnRegardAuCiel",
    label_color: LABEL_YELLOW,
};
const BANNER_WITH_TITLE: BannerSpec = BannerSpec {
    band: Rgba8::rgb(0x1b, 0x43, 0x32),
    label: "#UnRegardAuCiel",
    label_color: LABEL_YELLOW,
};
const BANNER_WITH_QUOTE: BannerSpec = BannerSpec {
    band: Rgba8::rgb(0x40, 0x91, 0x6c),
    label: "#RegardAuCiel",
    label_color: LABEL_YELLOW,
};

/// Band spec of a banner style.
pub fn banner_spec(style: FrameStyle) -> Option<BannerSpec> {
    match style {
        FrameStyle::BannerSimple => Some(BANNER_SIMPLE),
        FrameStyle::BannerWithTitle => Some(BANNER_WITH_TITLE),
        FrameStyle::BannerWithQuote => Some(BANNER_WITH_QUOTE),
        _ => None,
    }
}

/// Scrim stops, top to bottom.
pub const SCRIM_STOPS: [GradientStop; 4] = [
    GradientStop {
        offset: 0.0,
        color: Rgba8::rgba(0, 0, 0, 0),
    },
    GradientStop {
        offset: 0.2,
        color: Rgba8::rgba(10, 8, 5, 128),
    },
    GradientStop {
        offset: 0.5,
        color: Rgba8::rgba(15, 12, 8, 204),
    },
    GradientStop {
        offset: 1.0,
        color: Rgba8::rgba(10, 8, 5, 242),
    },
];

/// Fraction of the canvas height where the scrim starts, per style and orientation.
///
/// Tuned visually; keep these exact.
pub fn scrim_start_fraction(style: FrameStyle, orientation: Orientation) -> Option<f64> {
    let (square, landscape, portrait) = match style {
        FrameStyle::GospelSimple => (0.75, 0.70, 0.75),
        FrameStyle::GospelVerse => (0.65, 0.55, 0.65),
        FrameStyle::GospelNarrative => (0.45, 0.45, 0.48),
        _ => return None,
    };
    Some(match orientation {
        Orientation::Square => square,
        Orientation::Landscape => landscape,
        Orientation::Portrait => portrait,
    })
}

/// Scrim top edge in canvas pixels.
pub fn scrim_start(style: FrameStyle, canvas: Canvas) -> Option<f64> {
    scrim_start_fraction(style, canvas.orientation()).map(|f| canvas.h() * f)
}

/// Boundary where the scrim reaches its first solid stop.
pub fn solid_y(style: FrameStyle, canvas: Canvas) -> Option<f64> {
    scrim_start(style, canvas).map(|start| start + 0.2 * (canvas.h() - start))
}

/// Inputs shared by every frame function.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Style being drawn.
    pub style: FrameStyle,
    /// Target canvas.
    pub canvas: Canvas,
    /// Frame color.
    pub color: Rgba8,
    /// Logo anchor the frame must leave room for.
    pub anchor: LogoAnchor,
}

/// Frame drawing function.
pub type FrameFn = fn(&FrameInput) -> Vec<DrawOp>;

/// Dispatch table from style to frame function.
pub fn renderer(style: FrameStyle) -> FrameFn {
    match style {
        FrameStyle::Circular => circular,
        FrameStyle::Geometric => geometric,
        FrameStyle::Ornate => ornate,
        FrameStyle::GeometricSacred => sacred,
        FrameStyle::Elegant => elegant,
        FrameStyle::BannerSimple | FrameStyle::BannerWithTitle | FrameStyle::BannerWithQuote => {
            banner
        }
        FrameStyle::GospelSimple | FrameStyle::GospelVerse | FrameStyle::GospelNarrative => {
            scrim
        }
    }
}

/// Frame ops for `style`.
pub fn ops(style: FrameStyle, canvas: Canvas, color: Rgba8, anchor: LogoAnchor) -> Vec<DrawOp> {
    let input = FrameInput {
        style,
        canvas,
        color,
        anchor,
    };
    renderer(style)(&input)
}

fn stroke(path: BezPath, color: Rgba8, width: f64) -> DrawOp {
    DrawOp::StrokePath { path, color, width }
}

fn fill(path: BezPath, color: Rgba8) -> DrawOp {
    DrawOp::FillPath {
        path,
        paint: Paint::Solid(color),
    }
}

fn circular(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    vec![
        stroke(
            circle_path(c.center(), c.scale(400.0)),
            f.color,
            8.0 * c.factor(),
        ),
        stroke(
            circle_path(c.center(), c.scale(420.0)),
            f.color,
            4.0 * c.factor(),
        ),
    ]
}

fn geometric(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    let m = c.scale(60.0);
    let size = c.scale(40.0);
    let corner_w = 6.0 * c.factor();
    vec![
        stroke(cutout_border(c, m, &f.anchor), f.color, 8.0 * c.factor()),
        stroke(corner(Point::new(m, m), size, 1.0, 1.0), f.color, corner_w),
        stroke(
            corner(Point::new(c.w() - m, m), size, -1.0, 1.0),
            f.color,
            corner_w,
        ),
        stroke(
            corner(Point::new(m, c.h() - m), size, 1.0, -1.0),
            f.color,
            corner_w,
        ),
    ]
}

fn ornate(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    let m = c.scale(50.0);
    let dot = c.scale(8.0);
    let mut out = vec![
        stroke(cutout_border(c, m, &f.anchor), f.color, 10.0 * c.factor()),
        stroke(
            cutout_border(c, c.scale(70.0), &f.anchor),
            f.color,
            4.0 * c.factor(),
        ),
    ];
    for p in [
        Point::new(m, m),
        Point::new(c.w() - m, m),
        Point::new(m, c.h() - m),
    ] {
        out.push(fill(circle_path(p, dot), f.color));
    }
    out
}

fn sacred(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    vec![stroke(
        diamond(c.center(), c.scale(380.0)),
        f.color,
        6.0 * c.factor(),
    )]
}

fn elegant(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    vec![
        stroke(
            cutout_border(c, c.scale(70.0), &f.anchor),
            f.color,
            6.0 * c.factor(),
        ),
        stroke(
            cutout_border(c, c.scale(85.0), &f.anchor),
            f.color.with_opacity(0.6),
            2.0 * c.factor(),
        ),
    ]
}

fn banner(f: &FrameInput) -> Vec<DrawOp> {
    let Some(spec) = banner_spec(f.style) else {
        return Vec::new();
    };
    let c = f.canvas;
    let band = c.scale(BANNER_HEIGHT);
    vec![
        DrawOp::FillRect {
            rect: Rect::new(0.0, c.h() - band, c.w(), c.h()),
            paint: Paint::Solid(spec.band),
        },
        DrawOp::Text {
            text: spec.label.to_string(),
            font: FontSpec::new(DEFAULT_SERIF, c.scale(BANNER_LABEL_SIZE))
                .bold()
                .italic(),
            color: spec.label_color,
            x: c.w() / 2.0,
            y: c.h() - band / 2.0,
            baseline: TextBaseline::Middle,
        },
    ]
}

fn scrim(f: &FrameInput) -> Vec<DrawOp> {
    let c = f.canvas;
    let (Some(start), Some(solid)) = (scrim_start(f.style, c), solid_y(f.style, c)) else {
        return Vec::new();
    };
    let mut out = vec![DrawOp::FillRect {
        rect: Rect::new(0.0, start, c.w(), c.h()),
        paint: Paint::Linear(LinearGradient {
            start: Point::new(0.0, start),
            end: Point::new(0.0, c.h()),
            stops: SCRIM_STOPS.to_vec(),
        }),
    }];

    if matches!(
        f.style,
        FrameStyle::GospelVerse | FrameStyle::GospelNarrative
    ) {
        let half = c.w() * 0.3;
        let cx = c.w() / 2.0;
        out.push(stroke(
            polyline_path(&[Point::new(cx - half, solid), Point::new(cx + half, solid)]),
            f.color,
            1.5 * c.factor(),
        ));
        out.push(fill(diamond(Point::new(cx, solid), c.scale(6.0)), f.color));
    }
    out
}

/// L-shaped corner with its elbow at `at`; `sx`/`sy` pick the arm directions.
fn corner(at: Point, size: f64, sx: f64, sy: f64) -> BezPath {
    polyline_path(&[
        Point::new(at.x, at.y + sy * size),
        at,
        Point::new(at.x + sx * size, at.y),
    ])
}

fn diamond(center: Point, half: f64) -> BezPath {
    polygon_path(&[
        Point::new(center.x, center.y - half),
        Point::new(center.x + half, center.y),
        Point::new(center.x, center.y + half),
        Point::new(center.x - half, center.y),
    ])
}

/// Rectangle inset by `margin` whose bottom-right corner detours around the logo anchor.
pub fn cutout_border(canvas: Canvas, margin: f64, anchor: &LogoAnchor) -> BezPath {
    let left = margin;
    let top = margin;
    let right = canvas.w() - margin;
    let bottom = canvas.h() - margin;

    let cutout = anchor.radius + canvas.scale(10.0);
    let cx = anchor.x - cutout;
    let cy = anchor.y - cutout;
    let curve = canvas.scale(20.0);

    let mut path = BezPath::new();
    path.move_to((left, top));
    path.line_to((right, top));
    path.line_to((right, cy - curve));
    path.quad_to((right, cy), (right - curve, cy));
    path.line_to((cx + curve, cy));
    path.quad_to((cx, cy), (cx, cy + curve));
    path.line_to((cx, bottom - curve));
    path.quad_to((cx, bottom), (cx - curve, bottom));
    path.line_to((left, bottom));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
