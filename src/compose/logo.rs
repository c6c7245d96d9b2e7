use crate::{
    assets::loader::ImageLoader,
    card::{
        anchor::{LogoAnchor, LogoPlacement},
        state::RenderState,
    },
    compose::plan::{DrawOp, Paint, Shadow, TextBaseline, circle_path},
    foundation::{
        color::Rgba8,
        core::{Canvas, Circle, Rect, Vec2},
        error::CardError,
    },
    render::backend::RenderSettings,
    text::fonts::{DEFAULT_SANS, FontSpec},
};

const GLOW: Rgba8 = Rgba8::rgba(255, 255, 255, 204);

/// Logo ops plus the load failure, if the fallback badge was used.
#[derive(Debug)]
pub struct LogoOps {
    /// Ops in drawing order.
    pub ops: Vec<DrawOp>,
    /// Why the image could not be used.
    pub fallback: Option<CardError>,
}

/// Reference the logo is loaded from.
pub fn logo_reference<'a>(state: &'a RenderState, settings: &'a RenderSettings) -> &'a str {
    state
        .logo
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(settings.default_logo.as_str())
}

/// Load the logo and place it on `anchor`, or a text badge when loading fails.
///
/// `anchor` is the same value the frame cut its border around. Never fails; a load error is
/// logged and returned next to the fallback ops.
pub fn ops(
    anchor: LogoAnchor,
    state: &RenderState,
    canvas: Canvas,
    loader: &dyn ImageLoader,
    settings: &RenderSettings,
) -> LogoOps {
    let reference = logo_reference(state, settings);
    let mut out = Vec::new();

    if anchor.placement == LogoPlacement::TopRight {
        out.push(DrawOp::FillPath {
            path: circle_path(anchor.center(), anchor.radius),
            paint: Paint::Solid(Rgba8::WHITE),
        });
    }

    match loader.load(reference) {
        Ok(image) => {
            let half = anchor.size / 2.0;
            out.push(DrawOp::Shadowed {
                shadow: glow(15.0, canvas),
                ops: vec![DrawOp::Image {
                    image,
                    dest: Rect::new(
                        anchor.x - half,
                        anchor.y - half,
                        anchor.x + half,
                        anchor.y + half,
                    ),
                    clip: Some(Circle::new(anchor.center(), half)),
                }],
            });
            LogoOps {
                ops: out,
                fallback: None,
            }
        }
        Err(err) => {
            tracing::warn!(reference, error = %err, "logo unavailable, drawing fallback badge");
            out.push(DrawOp::Shadowed {
                shadow: glow(10.0, canvas),
                ops: vec![DrawOp::Text {
                    text: settings.fallback_mark.clone(),
                    font: FontSpec::new(DEFAULT_SANS, canvas.scale(28.0)).bold(),
                    color: state.frame_color,
                    x: anchor.x,
                    y: anchor.y,
                    baseline: TextBaseline::Middle,
                }],
            });
            LogoOps {
                ops: out,
                fallback: Some(err),
            }
        }
    }
}

fn glow(blur_ref: f64, canvas: Canvas) -> Shadow {
    Shadow {
        color: GLOW,
        blur: blur_ref * canvas.factor(),
        offset: Vec2::ZERO,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/logo.rs"]
mod tests;
