use crate::{
    catalog::{
        model::{Category, Template},
        templates,
    },
    foundation::{
        color::Rgba8,
        core::{Canvas, CanvasFormat},
        error::{CardError, CardResult},
    },
};

/// Longest accepted title or author, in characters.
pub const MAX_SHORT_FIELD_CHARS: usize = 300;
/// Longest accepted quote for short-form styles.
pub const MAX_QUOTE_CHARS: usize = 1000;
/// Longest accepted body text for long-form styles.
pub const MAX_LONG_FORM_CHARS: usize = 3000;

const DEFAULT_QUOTE: &str = "La vie est ce que nous en faisons. Les voyages sont les voyageurs. \
                             Ce que nous voyons n'est pas ce que nous voyons mais ce que nous sommes.";

/// Caller-owned content and visual overrides for one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderState {
    /// Heading text.
    pub title: String,
    /// Body text (quote, verse or narrative).
    pub quote: String,
    /// Author or scripture reference; empty suppresses the line.
    pub author: String,
    /// Background reference overriding the template default.
    pub background: Option<String>,
    /// Logo reference overriding the configured default.
    pub logo: Option<String>,
    /// Frame and accent color.
    pub frame_color: Rgba8,
    /// Main text color.
    pub text_color: Rgba8,
    /// Tint painted over the background.
    pub overlay_color: Rgba8,
    /// Tint opacity in percent, `0..=100`.
    pub overlay_opacity_percent: u8,
    /// Family applied to every text role when set.
    pub font_family: Option<String>,
    /// Pixels added to every resolved font size; may be negative.
    pub font_size_offset: i32,
    /// Output aspect ratio.
    pub format: CanvasFormat,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            title: "Pensée du Jour".to_string(),
            quote: DEFAULT_QUOTE.to_string(),
            author: String::new(),
            background: None,
            logo: None,
            frame_color: Rgba8::rgb(0xd4, 0xaf, 0x37),
            text_color: Rgba8::WHITE,
            overlay_color: Rgba8::BLACK,
            overlay_opacity_percent: 50,
            font_family: None,
            font_size_offset: 0,
            format: CanvasFormat::Square,
        }
    }
}

impl RenderState {
    /// Default state for a freshly selected category.
    pub fn for_category(category: Category) -> Self {
        let mut state = Self::default();
        state.apply_category(category);
        state
    }

    /// Reset content for a category switch.
    ///
    /// `jour` and `saint` only replace the title; `ciel` clears all text; `evangile` sets its
    /// heading and clears the body and reference. The background override is always dropped.
    pub fn apply_category(&mut self, category: Category) {
        match category {
            Category::Jour => self.title = "Pensée du Jour".to_string(),
            Category::Saint => self.title = "Pensée de Saint".to_string(),
            Category::Ciel => {
                self.title.clear();
                self.quote.clear();
                self.author.clear();
            }
            Category::Evangile => {
                self.title = "L'Évangile Illustré".to_string();
                self.quote.clear();
                self.author.clear();
            }
        }
        self.background = None;
    }

    /// Store generated text; the title is only replaced when one is supplied and non-empty.
    pub fn apply_generated(&mut self, quote: String, author: String, title: Option<String>) {
        self.quote = quote;
        self.author = author;
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
    }

    /// Pixel dimensions of the selected format.
    pub fn canvas(&self) -> Canvas {
        self.format.canvas()
    }

    /// Overlay opacity as a `0..=1` fraction.
    pub fn overlay_opacity(&self) -> f32 {
        f32::from(self.overlay_opacity_percent.min(100)) / 100.0
    }

    /// Check caller-supplied limits for rendering with `template`.
    pub fn validate(&self, template: &Template) -> CardResult<()> {
        if self.overlay_opacity_percent > 100 {
            return Err(CardError::validation(format!(
                "overlay_opacity_percent must be within 0..=100, got {}",
                self.overlay_opacity_percent
            )));
        }
        check_len("title", &self.title, MAX_SHORT_FIELD_CHARS)?;
        check_len("author", &self.author, MAX_SHORT_FIELD_CHARS)?;
        let quote_limit = if template.frame_style.is_long_form() {
            MAX_LONG_FORM_CHARS
        } else {
            MAX_QUOTE_CHARS
        };
        check_len("quote", &self.quote, quote_limit)?;
        if let Some(family) = &self.font_family
            && family.trim().is_empty()
        {
            return Err(CardError::validation("font_family must not be blank"));
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, max: usize) -> CardResult<()> {
    let n = value.chars().count();
    if n > max {
        return Err(CardError::validation(format!(
            "{field} is {n} characters long, limit is {max}"
        )));
    }
    Ok(())
}

/// Category plus style index, as picked by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Selection {
    /// Selected category.
    pub category: Category,
    /// Index into the category's variant list.
    pub style_index: usize,
}

impl Selection {
    /// First variant of `category`.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            style_index: 0,
        }
    }

    /// Switch category, resetting the variant index.
    pub fn switch_category(&mut self, category: Category) {
        self.category = category;
        self.style_index = 0;
    }

    /// Resolve through the catalog.
    pub fn template(&self) -> CardResult<&'static Template> {
        templates::get(self.category, self.style_index)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Category::Jour)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/state.rs"]
mod tests;
