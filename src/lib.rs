//! quotecard renders social-media quote cards.
//!
//! A card is composited from a background image (or a gradient fallback), a tinted overlay,
//! a decorative frame, wrapped typography and a corner logo. Rendering is split the same
//! way for every style:
//!
//! - Pick a [`Template`] from the catalog with [`templates::get`]
//! - Describe the content in a [`RenderState`]
//! - Call [`render_canvas`] with a [`CpuBackend`] and an [`ImageLoader`]
//! - Write the result with [`export_png`]
//!
//! Image and font failures never abort a render; they are replaced by fallbacks and
//! reported as [`Diagnostic`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod card;
mod catalog;
mod compose;
mod foundation;
mod render;
mod text;

pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::loader::{
    CachedImageLoader, FsImageLoader, ImageLoader, MemoryImageLoader, normalize_rel_path,
};
pub use crate::card::anchor::{LogoAnchor, LogoPlacement};
pub use crate::card::state::{RenderState, Selection};
pub use crate::catalog::model::{Category, FrameStyle, GalleryImage, Template};
pub use crate::catalog::templates;
pub use crate::compose::orchestrator::{
    PlanResult, RenderContext, RenderOutcome, RenderSession, RenderTicket, RenderedCard,
    build_plan, render_canvas,
};
pub use crate::compose::plan::{
    CardPlan, Diagnostic, DiagnosticKind, DrawOp, PHASE_BACKGROUND, PHASE_COMPOSE, Paint, Phase,
};
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, CanvasFormat, Orientation, scale_to_canvas};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::render::backend::{Executed, FrameRGBA, RenderBackend, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::export::{encode_png, export_file_name, export_png};
pub use crate::text::fonts::{
    FontLibrary, FontSpec, HeuristicMeasure, TextLayoutEngine, TextMeasure,
};
