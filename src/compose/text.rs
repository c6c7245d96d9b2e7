//! Typography placement, one layout function per [`FrameStyle`] family.

use crate::{
    card::state::RenderState,
    catalog::model::{FrameStyle, Template},
    compose::{
        frame::{self, BANNER_HEIGHT},
        plan::{DrawOp, Paint, Shadow, TextBaseline},
    },
    foundation::{
        color::Rgba8,
        core::{Canvas, Rect, Vec2},
        error::{CardError, CardResult},
    },
    text::{
        fonts::{DEFAULT_SERIF, FontSpec, TextMeasure, resolve_font, resolve_size},
        tiers::{NARRATIVE_TIERS, VERSE_TIERS, select_tier},
        wrap::{TextBlock, count_wrapped_lines, wrap_centered, wrap_from_top},
    },
};

/// Reference gold used by the long-form styles.
pub const GOSPEL_GOLD: Rgba8 = Rgba8::rgb(212, 175, 55);
/// Author color above the banner band.
pub const BANNER_AUTHOR: Rgba8 = Rgba8::rgb(0xff, 0xd6, 0x0a);

const BANNER_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 204);
const GOSPEL_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 255);
const VERSE_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 242);
const NARRATIVE_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 235);

/// Smallest font the narrative overflow shrink may reach, reference pixels.
pub const NARRATIVE_MIN_FONT: f64 = 11.0;

/// Everything a text layout function reads.
pub struct TextInput<'a> {
    /// Selected template.
    pub template: &'a Template,
    /// Caller content.
    pub state: &'a RenderState,
    /// Target canvas.
    pub canvas: Canvas,
}

impl TextInput<'_> {
    fn font(&self, template_font: &str, base_ref: f64) -> FontSpec {
        FontSpec::new(
            resolve_font(template_font, self.state.font_family.as_deref()),
            resolve_size(base_ref, self.state.font_size_offset, self.canvas),
        )
    }

    fn cx(&self) -> f64 {
        self.canvas.w() / 2.0
    }
}

/// Text layout function.
pub type TextFn = fn(&TextInput<'_>, &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>>;

/// Dispatch table from style to text layout function.
pub fn renderer(style: FrameStyle) -> TextFn {
    match style {
        FrameStyle::Circular
        | FrameStyle::Geometric
        | FrameStyle::Ornate
        | FrameStyle::GeometricSacred
        | FrameStyle::Elegant => classic,
        FrameStyle::BannerSimple => banner_simple,
        FrameStyle::BannerWithTitle => banner_with_title,
        FrameStyle::BannerWithQuote => banner_with_quote,
        FrameStyle::GospelSimple => gospel_simple,
        FrameStyle::GospelVerse => gospel_verse,
        FrameStyle::GospelNarrative => gospel_narrative,
    }
}

/// Text ops for the template's style.
pub fn ops(
    template: &Template,
    state: &RenderState,
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
) -> CardResult<Vec<DrawOp>> {
    let input = TextInput {
        template,
        state,
        canvas,
    };
    renderer(template.frame_style)(&input, measure)
}

fn line(text: impl Into<String>, font: &FontSpec, color: Rgba8, x: f64, y: f64) -> DrawOp {
    DrawOp::Text {
        text: text.into(),
        font: font.clone(),
        color,
        x,
        y,
        baseline: TextBaseline::Middle,
    }
}

fn top_line(text: impl Into<String>, font: &FontSpec, color: Rgba8, x: f64, y: f64) -> DrawOp {
    DrawOp::Text {
        text: text.into(),
        font: font.clone(),
        color,
        x,
        y,
        baseline: TextBaseline::Top,
    }
}

fn block_ops(block: &TextBlock, font: &FontSpec, color: Rgba8, baseline: TextBaseline) -> Vec<DrawOp> {
    block
        .lines
        .iter()
        .filter(|l| !l.text.is_empty())
        .map(|l| DrawOp::Text {
            text: l.text.clone(),
            font: font.clone(),
            color,
            x: l.x,
            y: l.y,
            baseline,
        })
        .collect()
}

fn ensure_finite(what: &str, values: &[f64]) -> CardResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CardError::draw(format!("{what} layout produced non-finite geometry")))
    }
}

fn shadowed(color: Rgba8, blur_ref: f64, canvas: Canvas, ops: Vec<DrawOp>) -> Vec<DrawOp> {
    if ops.is_empty() {
        return ops;
    }
    let offset = 2.0 * canvas.factor();
    vec![DrawOp::Shadowed {
        shadow: Shadow {
            color,
            blur: blur_ref * canvas.factor(),
            offset: Vec2::new(offset, offset),
        },
        ops,
    }]
}

/// Vertical positions of the classic (framed) layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassicLayout {
    /// Title middle line.
    pub title_y: f64,
    /// Underline rectangle.
    pub underline: Rect,
    /// Wrapped quote.
    pub quote: TextBlock,
    /// Author middle line; `None` when the author is empty.
    pub author_y: Option<f64>,
}

/// Lay out title, underline, quote and author for the framed styles.
pub fn classic_layout(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> ClassicLayout {
    let c = input.canvas;
    let t = input.template;
    let cx = input.cx();
    let quote_font = input.font(t.quote_font, f64::from(t.quote_size));
    let author_size = resolve_size(f64::from(t.author_size), input.state.font_size_offset, c);

    let underline_w = c.scale(200.0);
    let underline_y = c.h() * 0.234;
    let quote = wrap_centered(
        &input.state.quote,
        cx,
        c.h() / 2.0,
        c.w() * 0.68,
        quote_font.size * 1.4,
        &quote_font,
        measure,
    );

    let author_y = (!input.state.author.is_empty()).then(|| {
        if t.frame_style == FrameStyle::Circular {
            c.center().y + c.scale(400.0) - author_size - c.scale(60.0)
        } else {
            c.h() - c.scale(200.0)
        }
    });

    ClassicLayout {
        title_y: c.h() * 0.195,
        underline: Rect::new(
            cx - underline_w / 2.0,
            underline_y,
            cx + underline_w / 2.0,
            underline_y + c.scale(3.0).max(1.0),
        ),
        quote,
        author_y,
    }
}

fn classic(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>> {
    let t = input.template;
    let s = input.state;
    let cx = input.cx();
    let layout = classic_layout(input, measure);
    ensure_finite("classic", &[layout.title_y, layout.quote.end_y])?;

    let mut out = Vec::new();
    if !s.title.is_empty() {
        let font = input.font(t.title_font, f64::from(t.title_size));
        out.push(line(s.title.as_str(), &font, s.text_color, cx, layout.title_y));
    }
    out.push(DrawOp::FillRect {
        rect: layout.underline,
        paint: Paint::Solid(s.frame_color),
    });
    let quote_font = input.font(t.quote_font, f64::from(t.quote_size));
    out.extend(block_ops(
        &layout.quote,
        &quote_font,
        s.text_color,
        TextBaseline::Middle,
    ));
    if let Some(y) = layout.author_y {
        let font = input.font(t.author_font, f64::from(t.author_size)).italic();
        out.push(line(format!("— {}", s.author), &font, s.text_color, cx, y));
    }
    Ok(out)
}

fn banner_simple(_: &TextInput<'_>, _: &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>> {
    Ok(Vec::new())
}

fn banner_with_title(input: &TextInput<'_>, _: &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>> {
    let c = input.canvas;
    let s = input.state;
    if s.title.is_empty() {
        return Ok(Vec::new());
    }
    let t = input.template;
    let font = input.font(t.title_font, f64::from(t.title_size)).bold();
    let y = c.h() - c.scale(BANNER_HEIGHT) - c.scale(60.0);
    Ok(shadowed(
        BANNER_SHADOW,
        10.0,
        c,
        vec![line(s.title.as_str(), &font, s.text_color, input.cx(), y)],
    ))
}

fn banner_with_quote(
    input: &TextInput<'_>,
    measure: &mut dyn TextMeasure,
) -> CardResult<Vec<DrawOp>> {
    let c = input.canvas;
    let s = input.state;
    let t = input.template;
    let band = c.scale(BANNER_HEIGHT);
    let mut content = Vec::new();

    if !s.quote.is_empty() {
        let font = input.font(t.quote_font, f64::from(t.quote_size)).italic();
        let block = wrap_centered(
            &format!("“{}”", s.quote),
            input.cx(),
            c.h() - band - c.scale(120.0),
            c.scale(800.0),
            font.size * 1.3,
            &font,
            measure,
        );
        ensure_finite("banner quote", &[block.end_y])?;
        content.extend(block_ops(&block, &font, s.text_color, TextBaseline::Middle));
    }
    if !s.author.is_empty() {
        let font = input.font(t.author_font, f64::from(t.author_size)).bold();
        content.push(line(
            format!("— {}", s.author),
            &font,
            BANNER_AUTHOR,
            input.cx(),
            c.h() - band - c.scale(40.0),
        ));
    }
    Ok(shadowed(BANNER_SHADOW, 10.0, c, content))
}

fn gospel_fonts(input: &TextInput<'_>) -> (String, String) {
    let family = input.state.font_family.as_deref();
    (
        resolve_font(DEFAULT_SERIF, family),
        resolve_font(input.template.quote_font, family),
    )
}

/// Positions of the simple gospel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct GospelSimpleLayout {
    /// Title font (bold).
    pub title_font: FontSpec,
    /// Wrapped title; its last line ends above the reference line.
    pub title: TextBlock,
    /// Top of the reference line.
    pub reference_y: f64,
}

/// Wrap the title and lift it so a multi-line title never reaches the reference.
///
/// A one-line title starts at `h - scale(130)`; longer titles grow upward.
pub fn gospel_simple_layout(
    input: &TextInput<'_>,
    measure: &mut dyn TextMeasure,
) -> GospelSimpleLayout {
    let c = input.canvas;
    let s = input.state;
    let (serif, _) = gospel_fonts(input);
    let title_font = FontSpec::new(serif, resolve_size(32.0, s.font_size_offset, c)).bold();
    let line_height = title_font.size * 1.25;
    let max_width = c.w() * 0.9;
    let reference_y = c.h() - c.scale(60.0);

    let lines = count_wrapped_lines(&s.title, max_width, &title_font, measure);
    let title_top = (c.h() - c.scale(130.0))
        .min(reference_y - c.scale(30.0) - lines as f64 * line_height)
        .max(0.0);
    let title = if s.title.is_empty() {
        TextBlock {
            lines: Vec::new(),
            end_y: title_top,
        }
    } else {
        wrap_from_top(
            &s.title,
            input.cx(),
            title_top,
            max_width,
            line_height,
            &title_font,
            measure,
        )
    };
    GospelSimpleLayout {
        title_font,
        title,
        reference_y,
    }
}

fn gospel_simple(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>> {
    let c = input.canvas;
    let s = input.state;
    let (serif, _) = gospel_fonts(input);
    let layout = gospel_simple_layout(input, measure);
    ensure_finite("gospel title", &[layout.title.end_y])?;

    let mut content = block_ops(
        &layout.title,
        &layout.title_font,
        Rgba8::WHITE,
        TextBaseline::Top,
    );
    if !s.author.is_empty() {
        let font = FontSpec::new(serif, resolve_size(24.0, s.font_size_offset, c)).italic();
        content.push(top_line(
            s.author.as_str(),
            &font,
            GOSPEL_GOLD,
            input.cx(),
            layout.reference_y,
        ));
    }
    Ok(shadowed(GOSPEL_SHADOW, 12.0, c, content))
}

/// Bottom-up positions of the verse layout.
#[derive(Clone, Debug, PartialEq)]
pub struct VerseLayout {
    /// Verse font (italic).
    pub verse_font: FontSpec,
    /// Verse line height.
    pub line_height: f64,
    /// Wrap width.
    pub max_width: f64,
    /// Number of wrapped verse lines.
    pub lines: usize,
    /// Top of the verse block.
    pub verse_start: f64,
    /// Top of the title line.
    pub title_y: f64,
    /// Top of the reference line.
    pub reference_y: f64,
}

/// Measure the verse and stack title above it, anchored on the reference line.
pub fn verse_layout(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> VerseLayout {
    let c = input.canvas;
    let s = input.state;
    let offset = s.font_size_offset;
    let (_, quote_family) = gospel_fonts(input);

    let tier = select_tier(VERSE_TIERS, s.quote.chars().count());
    let size = resolve_size(f64::from(tier.size), offset, c);
    let line_height = (size + 3.0).max(c.scale(f64::from(tier.line_height)) + f64::from(offset));
    let max_width = c.scale(900.0);
    let verse_font = FontSpec::new(quote_family, size).italic();
    let lines = count_wrapped_lines(&s.quote, max_width, &verse_font, measure);

    let reference_y = c.h() - c.scale(55.0);
    let verse_start = reference_y - c.scale(40.0) - lines as f64 * line_height;
    VerseLayout {
        verse_font,
        line_height,
        max_width,
        lines,
        verse_start,
        title_y: verse_start - c.scale(60.0),
        reference_y,
    }
}

fn gospel_verse(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> CardResult<Vec<DrawOp>> {
    let c = input.canvas;
    let s = input.state;
    let offset = s.font_size_offset;
    let (serif, _) = gospel_fonts(input);
    let layout = verse_layout(input, measure);
    ensure_finite("verse", &[layout.verse_start, layout.line_height])?;
    let mut content = Vec::new();

    if !s.title.is_empty() {
        let font = FontSpec::new(serif.as_str(), resolve_size(24.0, offset, c)).bold();
        content.push(top_line(
            s.title.as_str(),
            &font,
            Rgba8::WHITE,
            input.cx(),
            layout.title_y,
        ));
    }
    if !s.quote.is_empty() {
        let block = wrap_from_top(
            &s.quote,
            input.cx(),
            layout.verse_start,
            layout.max_width,
            layout.line_height,
            &layout.verse_font,
            measure,
        );
        content.extend(block_ops(
            &block,
            &layout.verse_font,
            VERSE_COLOR,
            TextBaseline::Top,
        ));
    }
    if !s.author.is_empty() {
        let font = FontSpec::new(serif.as_str(), resolve_size(22.0, offset, c)).italic();
        content.push(top_line(
            s.author.as_str(),
            &font,
            GOSPEL_GOLD,
            input.cx(),
            layout.reference_y,
        ));
    }
    Ok(shadowed(GOSPEL_SHADOW, 12.0, c, content))
}

/// Top-down positions of the narrative layout.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrativeLayout {
    /// Wrapped title, starting inside the scrim's solid zone.
    pub title: TextBlock,
    /// Gold divider under the title.
    pub divider: Rect,
    /// Body font after any overflow shrink.
    pub body_font: FontSpec,
    /// Body line height after any overflow shrink.
    pub line_height: f64,
    /// Wrap width of the body.
    pub max_width: f64,
    /// Top of the body clip.
    pub body_top: f64,
    /// Bottom of the body clip.
    pub clip_bottom: f64,
    /// Reference middle line.
    pub reference_y: f64,
    /// Reference font size.
    pub reference_size: f64,
    /// Whether the overflow shrink kicked in.
    pub shrunk: bool,
}

impl NarrativeLayout {
    /// Body clip rectangle.
    pub fn clip(&self, canvas: Canvas) -> Rect {
        Rect::new(0.0, self.body_top, canvas.w(), self.clip_bottom)
    }
}

/// Stack title, divider and body from the scrim boundary and fit the body above the reference.
pub fn narrative_layout(input: &TextInput<'_>, measure: &mut dyn TextMeasure) -> NarrativeLayout {
    let c = input.canvas;
    let s = input.state;
    let offset = s.font_size_offset;
    let (serif, body_family) = gospel_fonts(input);
    let cx = input.cx();
    let max_width = c.w() * 0.9;

    let solid = frame::solid_y(FrameStyle::GospelNarrative, c).unwrap_or(c.h() * 0.5);
    let title_font = FontSpec::new(serif, resolve_size(22.0, offset, c)).bold();
    let title_top = solid + c.scale(20.0);
    let title = if s.title.is_empty() {
        TextBlock {
            lines: Vec::new(),
            end_y: title_top,
        }
    } else {
        wrap_from_top(
            &s.title,
            cx,
            title_top,
            max_width,
            title_font.size * 1.3,
            &title_font,
            measure,
        )
    };
    let cursor = title.end_y;
    let divider_w = c.scale(120.0);
    let divider_y = cursor + c.scale(6.0);
    let divider = Rect::new(
        cx - divider_w / 2.0,
        divider_y,
        cx + divider_w / 2.0,
        divider_y + c.scale(1.0).max(1.0),
    );
    let body_top = cursor + c.scale(22.0);

    let chars = s.quote.chars().count();
    let tier = select_tier(NARRATIVE_TIERS, chars);
    let mut size = resolve_size(f64::from(tier.size), offset, c);
    let mut line_height =
        (size + 3.0).max(c.scale(f64::from(tier.line_height)) + f64::from(offset));

    let reference_size = resolve_size(20.0, offset, c);
    let reference_y = c.h() - c.scale(45.0);
    let clip_bottom = reference_y - reference_size - c.scale(12.0);

    let available = clip_bottom - body_top;
    let estimated = (chars as f64 * 0.5 * size / max_width).ceil() * line_height;
    let mut shrunk = false;
    if estimated > available && available > 0.0 {
        let ratio = available / estimated;
        size = (size * ratio).max(NARRATIVE_MIN_FONT.min(size));
        line_height = (line_height * ratio).max(size + 3.0);
        shrunk = true;
    }

    NarrativeLayout {
        title,
        divider,
        body_font: FontSpec::new(body_family, size),
        line_height,
        max_width,
        body_top,
        clip_bottom,
        reference_y,
        reference_size,
        shrunk,
    }
}

fn gospel_narrative(
    input: &TextInput<'_>,
    measure: &mut dyn TextMeasure,
) -> CardResult<Vec<DrawOp>> {
    let c = input.canvas;
    let s = input.state;
    let (serif, _) = gospel_fonts(input);
    let layout = narrative_layout(input, measure);
    ensure_finite(
        "narrative",
        &[layout.body_top, layout.clip_bottom, layout.line_height],
    )?;

    let mut content = Vec::new();
    if !layout.title.lines.is_empty() {
        let title_font =
            FontSpec::new(serif.as_str(), resolve_size(22.0, s.font_size_offset, c)).bold();
        content.extend(block_ops(
            &layout.title,
            &title_font,
            Rgba8::WHITE,
            TextBaseline::Top,
        ));
    }
    content.push(DrawOp::FillRect {
        rect: layout.divider,
        paint: Paint::Solid(GOSPEL_GOLD),
    });
    if !s.quote.is_empty() && layout.clip_bottom > layout.body_top {
        let body = wrap_from_top(
            &s.quote,
            input.cx(),
            layout.body_top,
            layout.max_width,
            layout.line_height,
            &layout.body_font,
            measure,
        );
        content.push(DrawOp::PushClip {
            rect: layout.clip(c),
        });
        content.extend(block_ops(
            &body,
            &layout.body_font,
            NARRATIVE_COLOR,
            TextBaseline::Top,
        ));
        content.push(DrawOp::PopClip);
    }
    if !s.author.is_empty() {
        let font = FontSpec::new(serif.as_str(), layout.reference_size).italic();
        content.push(line(
            s.author.as_str(),
            &font,
            GOSPEL_GOLD,
            input.cx(),
            layout.reference_y,
        ));
    }
    Ok(shadowed(GOSPEL_SHADOW, 12.0, c, content))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
