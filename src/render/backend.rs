use crate::{
    compose::plan::{CardPlan, Diagnostic},
    foundation::{error::CardResult, math::unpremultiply_rgba8_in_place},
    text::fonts::TextMeasure,
};

/// A rendered card as RGBA8 pixels.
///
/// Backends produce **premultiplied alpha**; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut px: [u8; 4] = self.data.get(idx..idx + 4)?.try_into().ok()?;
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut px);
        }
        Some(px)
    }
}

/// Output of one plan execution.
#[derive(Clone, Debug)]
pub struct Executed {
    /// Final pixels.
    pub frame: FrameRGBA,
    /// Phases that stopped early, in drawing order.
    pub diagnostics: Vec<Diagnostic>,
}

/// A rasterizer that executes a [`CardPlan`].
pub trait RenderBackend {
    /// Execute every phase of `plan`.
    ///
    /// A failing op ends its phase and is reported in [`Executed::diagnostics`]; only
    /// problems with the target itself (for example an oversized canvas) return `Err`.
    fn execute(&mut self, plan: &CardPlan) -> CardResult<Executed>;

    /// Measurer whose widths match the glyphs this backend draws.
    fn text_measure(&mut self) -> &mut dyn TextMeasure;
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// If set, the target is cleared to this straight RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Logo reference used when the state carries none.
    pub default_logo: String,
    /// Text drawn in place of a logo that failed to load.
    pub fallback_mark: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            default_logo: "images/logo-vds.png".to_string(),
            fallback_mark: "VDS".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
