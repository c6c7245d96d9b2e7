use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    assets::{decode::DecodedImage, loader::ImageLoader},
    card::{anchor::LogoAnchor, state::RenderState},
    catalog::model::Template,
    compose::{
        frame, logo,
        plan::{
            CardPlan, Diagnostic, DrawOp, GradientStop, LinearGradient, PHASE_BACKGROUND,
            PHASE_COMPOSE, Paint, Phase,
        },
        text,
    },
    foundation::{
        color::Rgba8,
        core::{Canvas, Point, Rect},
    },
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    text::fonts::TextMeasure,
};

/// Stops of the background drawn when the background image cannot be loaded.
pub const FALLBACK_GRADIENT: [GradientStop; 2] = [
    GradientStop {
        offset: 0.0,
        color: Rgba8::rgb(0x2c, 0x3e, 0x50),
    },
    GradientStop {
        offset: 1.0,
        color: Rgba8::rgb(0x34, 0x98, 0xdb),
    },
];

/// Hands out generation tickets so results of superseded renders can be dropped.
///
/// Cloning shares the generation counter.
#[derive(Clone, Debug, Default)]
pub struct RenderSession {
    generation: Arc<AtomicU64>,
}

impl RenderSession {
    /// Fresh session with no render started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render, invalidating every earlier ticket of this session.
    pub fn begin(&self) -> RenderTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RenderTicket {
            generation,
            latest: Arc::clone(&self.generation),
        }
    }
}

/// Proof that a render was the latest one started when it was issued.
#[derive(Clone, Debug)]
pub struct RenderTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RenderTicket {
    /// Ticket of a one-off render nothing can supersede.
    pub fn detached() -> Self {
        RenderSession::new().begin()
    }

    /// Generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer render began on the same session.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Collaborators a render needs besides the backend.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Source of background and logo images.
    pub loader: &'a dyn ImageLoader,
    /// Logo defaults.
    pub settings: &'a RenderSettings,
}

/// A plan plus the problems recovered while building it.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Ops to rasterize.
    pub plan: CardPlan,
    /// Fallbacks taken and stages that stopped early.
    pub diagnostics: Vec<Diagnostic>,
}

/// A finished card.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    /// Final pixels.
    pub frame: FrameRGBA,
    /// Fallbacks taken and phases that stopped early, in drawing order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of [`render_canvas`].
#[derive(Clone, Debug)]
pub enum RenderOutcome {
    /// The card was drawn, possibly with fallbacks.
    Rendered(RenderedCard),
    /// A newer render started; this result was discarded.
    Superseded,
}

impl RenderOutcome {
    /// The rendered card, if any.
    pub fn rendered(self) -> Option<RenderedCard> {
        match self {
            Self::Rendered(card) => Some(card),
            Self::Superseded => None,
        }
    }
}

/// Destination rectangle filling `canvas` with `image` scaled uniformly and centered.
pub fn cover_rect(canvas: Canvas, image_width: u32, image_height: u32) -> Rect {
    let (iw, ih) = (f64::from(image_width), f64::from(image_height));
    let scale = (canvas.w() / iw).max(canvas.h() / ih);
    let (dw, dh) = (iw * scale, ih * scale);
    let x0 = (canvas.w() - dw) / 2.0;
    let y0 = (canvas.h() - dh) / 2.0;
    Rect::new(x0, y0, x0 + dw, y0 + dh)
}

/// Reference the background is loaded from.
pub fn background_reference<'a>(template: &'a Template, state: &'a RenderState) -> &'a str {
    state
        .background
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(template.default_background)
}

fn background_op(image: Arc<DecodedImage>, canvas: Canvas) -> DrawOp {
    let dest = cover_rect(canvas, image.width, image.height);
    DrawOp::Image {
        image,
        dest,
        clip: None,
    }
}

fn fallback_background_op(canvas: Canvas) -> DrawOp {
    DrawOp::FillRect {
        rect: canvas.rect(),
        paint: Paint::Linear(LinearGradient {
            start: Point::ZERO,
            end: Point::new(canvas.w(), canvas.h()),
            stops: FALLBACK_GRADIENT.to_vec(),
        }),
    }
}

fn overlay_op(state: &RenderState, canvas: Canvas) -> DrawOp {
    DrawOp::FillRect {
        rect: canvas.rect(),
        paint: Paint::Solid(state.overlay_color.with_opacity(state.overlay_opacity())),
    }
}

/// Build the draw plan for one card.
///
/// Returns `None` when `ticket` went stale during one of the image loads.
pub fn build_plan(
    template: &Template,
    state: &RenderState,
    ctx: &RenderContext<'_>,
    measure: &mut dyn TextMeasure,
    ticket: &RenderTicket,
) -> Option<PlanResult> {
    let canvas = state.canvas();
    let mut diagnostics = Vec::new();

    let reference = background_reference(template, state);
    let background = match ctx.loader.load(reference) {
        Ok(image) => background_op(image, canvas),
        Err(err) => {
            tracing::warn!(reference, error = %err, "background unavailable, using gradient");
            diagnostics.push(Diagnostic::asset_fallback(PHASE_BACKGROUND, err.to_string()));
            fallback_background_op(canvas)
        }
    };
    if !ticket.is_current() {
        tracing::debug!(generation = ticket.generation(), "superseded during background load");
        return None;
    }

    let style = template.frame_style;
    let anchor = LogoAnchor::for_style(canvas, style);
    let mut compose = vec![overlay_op(state, canvas)];
    compose.extend(frame::ops(style, canvas, state.frame_color, anchor));
    match text::ops(template, state, canvas, measure) {
        Ok(ops) => {
            compose.extend(ops);
            let logo = logo::ops(anchor, state, canvas, ctx.loader, ctx.settings);
            if !ticket.is_current() {
                tracing::debug!(generation = ticket.generation(), "superseded during logo load");
                return None;
            }
            if let Some(err) = logo.fallback {
                diagnostics.push(Diagnostic::asset_fallback(PHASE_COMPOSE, err.to_string()));
            }
            compose.extend(logo.ops);
        }
        Err(err) => {
            tracing::warn!(template = template.id, error = %err, "text layout failed");
            diagnostics.push(Diagnostic::draw_failure(PHASE_COMPOSE, err.to_string()));
        }
    }

    Some(PlanResult {
        plan: CardPlan {
            canvas,
            phases: vec![
                Phase {
                    name: PHASE_BACKGROUND,
                    ops: vec![background],
                },
                Phase {
                    name: PHASE_COMPOSE,
                    ops: compose,
                },
            ],
        },
        diagnostics,
    })
}

/// Render one card with best-effort compositing.
///
/// Never fails: load errors become fallbacks and drawing errors end their phase, both
/// reported in [`RenderedCard::diagnostics`].
#[tracing::instrument(
    skip_all,
    fields(template = template.id, format = state.format.label(), generation = ticket.generation())
)]
pub fn render_canvas(
    backend: &mut dyn RenderBackend,
    template: &Template,
    state: &RenderState,
    ctx: &RenderContext<'_>,
    ticket: &RenderTicket,
) -> RenderOutcome {
    let Some(PlanResult {
        plan,
        mut diagnostics,
    }) = build_plan(template, state, ctx, backend.text_measure(), ticket)
    else {
        return RenderOutcome::Superseded;
    };

    let frame = match backend.execute(&plan) {
        Ok(executed) => {
            diagnostics.extend(executed.diagnostics);
            executed.frame
        }
        Err(err) => {
            tracing::warn!(error = %err, "backend rejected the plan");
            for phase in &plan.phases {
                diagnostics.push(Diagnostic::draw_failure(phase.name, err.to_string()));
            }
            FrameRGBA {
                width: plan.canvas.width,
                height: plan.canvas.height,
                data: vec![0; plan.canvas.width as usize * plan.canvas.height as usize * 4],
                premultiplied: true,
            }
        }
    };

    if !ticket.is_current() {
        return RenderOutcome::Superseded;
    }
    tracing::debug!(diagnostics = diagnostics.len(), "card rendered");
    RenderOutcome::Rendered(RenderedCard { frame, diagnostics })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/orchestrator.rs"]
mod tests;
