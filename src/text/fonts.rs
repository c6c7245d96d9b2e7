use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{CardError, CardResult},
};

/// Smallest font size any text role may resolve to, in canvas pixels.
pub const MIN_FONT_PX: f64 = 8.0;

/// Family used when a face lookup fails and the request names a serif design.
pub const DEFAULT_SERIF: &str = "Playfair Display";
/// Family used for every other failed lookup.
pub const DEFAULT_SANS: &str = "Inter";

const SERIF_FAMILIES: &[&str] = &[
    "Playfair Display",
    "Lora",
    "Merriweather",
    "Cinzel",
    "Cormorant Garamond",
    "Libre Baskerville",
];
const SCRIPT_FAMILIES: &[&str] = &["Dancing Script"];

/// Font request attached to a text draw operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FontSpec {
    /// Family name, matched case-insensitively against loaded faces.
    pub family: String,
    /// Size in canvas pixels.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl FontSpec {
    /// Regular face of `family` at `size`.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Same request with bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same request with italic style.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Coarse family classification used when the exact family is not loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenericFamily {
    /// Serif display and text faces.
    Serif,
    /// Everything not listed as serif or script.
    SansSerif,
    /// Handwriting faces.
    Script,
}

/// Classify a family name.
pub fn generic_family(family: &str) -> GenericFamily {
    let family = family.trim();
    if SERIF_FAMILIES.iter().any(|f| f.eq_ignore_ascii_case(family)) {
        GenericFamily::Serif
    } else if SCRIPT_FAMILIES.iter().any(|f| f.eq_ignore_ascii_case(family)) {
        GenericFamily::Script
    } else {
        GenericFamily::SansSerif
    }
}

/// Pick the family for a text role: the caller override when set and non-blank, else the
/// template's family.
pub fn resolve_font(template_font: &str, override_family: Option<&str>) -> String {
    match override_family.map(str::trim) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => template_font.to_string(),
    }
}

/// Scale a reference size to `canvas`, apply the caller offset and clamp to [`MIN_FONT_PX`].
pub fn resolve_size(base_ref: f64, offset: i32, canvas: Canvas) -> f64 {
    (canvas.scale(base_ref) + f64::from(offset)).max(MIN_FONT_PX)
}

/// Width measuring capability used by the wrap algorithms.
pub trait TextMeasure {
    /// Advance width of `text` set in `font`, in canvas pixels.
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// Average-character-width estimate; deterministic and font-free.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicMeasure;

impl HeuristicMeasure {
    /// Width of one character as a fraction of the font size.
    pub fn char_factor(font: &FontSpec) -> f64 {
        if font.bold { 0.55 } else { 0.5 }
    }
}

impl TextMeasure for HeuristicMeasure {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * Self::char_factor(font)
    }
}

/// One registered font file.
#[derive(Clone)]
pub struct FontFace {
    /// Family name reported by the font tables.
    pub family: String,
    /// Bold face (from the file name).
    pub bold: bool,
    /// Italic face (from the file name).
    pub italic: bool,
    /// Raw font bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Glyph source handed to the rasterizer.
    pub data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bold", &self.bold)
            .field("italic", &self.italic)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Set of loaded font faces.
#[derive(Clone, Debug, Default)]
pub struct FontLibrary {
    faces: Vec<FontFace>,
}

impl FontLibrary {
    /// Empty library; every measurement falls back to [`HeuristicMeasure`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `.ttf`/`.otf` file in `dir` and in `dir/fonts`.
    ///
    /// Unreadable or unparsable files are skipped with a warning.
    pub fn load_dir(dir: &Path) -> Self {
        let mut lib = Self::new();
        lib.add_dir(dir);
        lib.add_dir(&dir.join("fonts"));
        tracing::debug!(dir = %dir.display(), faces = lib.faces.len(), "font library loaded");
        lib
    }

    fn add_dir(&mut self, dir: &Path) {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return;
        };

        let mut paths: Vec<PathBuf> = rd.flatten().map(|e| e.path()).collect();
        paths.sort();
        for path in paths {
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" {
                continue;
            }
            if let Err(err) = self.add_file(&path) {
                tracing::warn!(path = %path.display(), error = %err, "skipping font file");
            }
        }
    }

    /// Register one font file; style flags come from the file stem (`*-BoldItalic.ttf`).
    pub fn add_file(&mut self, path: &Path) -> CardResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file {}", path.display()))?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        self.add_bytes(bytes, stem.contains("bold"), stem.contains("italic"))
    }

    /// Register raw font bytes and return the family name they declare.
    pub fn add_bytes(&mut self, bytes: Vec<u8>, bold: bool, italic: bool) -> CardResult<String> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::validation("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::validation("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        self.faces.push(FontFace {
            family: family.clone(),
            bold,
            italic,
            bytes: Arc::new(bytes),
            data,
        });
        Ok(family)
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Registered faces in load order.
    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    /// Index of the best face for `spec`.
    ///
    /// Order: exact family with matching style, exact family in any style, default family of
    /// the same generic class, then any face at all.
    pub fn resolve(&self, spec: &FontSpec) -> Option<usize> {
        let style_score = |f: &FontFace| {
            u8::from(f.bold == spec.bold) * 2 + u8::from(f.italic == spec.italic)
        };
        let best_of = |family: &str| {
            self.faces
                .iter()
                .enumerate()
                .filter(|(_, f)| f.family.eq_ignore_ascii_case(family.trim()))
                .max_by_key(|(i, f)| (style_score(f), std::cmp::Reverse(*i)))
                .map(|(i, _)| i)
        };

        best_of(&spec.family)
            .or_else(|| match generic_family(&spec.family) {
                GenericFamily::Serif | GenericFamily::Script => best_of(DEFAULT_SERIF),
                GenericFamily::SansSerif => best_of(DEFAULT_SANS),
            })
            .or_else(|| {
                self.faces
                    .iter()
                    .enumerate()
                    .max_by_key(|(i, f)| (style_score(f), std::cmp::Reverse(*i)))
                    .map(|(i, _)| i)
            })
    }
}

/// One glyph of a shaped line, relative to the line's left edge and baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph id in the face.
    pub id: u32,
    /// Horizontal pen position.
    pub x: f32,
    /// Vertical offset from the baseline.
    pub y: f32,
}

/// A single shaped line of text.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    /// Index of the face in the owning [`FontLibrary`].
    pub face: usize,
    /// Positioned glyphs.
    pub glyphs: Vec<ShapedGlyph>,
    /// Advance width.
    pub width: f64,
    /// Ascent above the baseline.
    pub ascent: f64,
    /// Descent below the baseline.
    pub descent: f64,
}

/// Parley-backed shaper and measurer over a [`FontLibrary`].
///
/// Each face gets its own font context so a query can only resolve to the face the library
/// picked.
pub struct TextLayoutEngine {
    library: FontLibrary,
    font_ctxs: Vec<parley::FontContext>,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new(FontLibrary::new())
    }
}

impl TextLayoutEngine {
    /// Build an engine over `library`.
    pub fn new(library: FontLibrary) -> Self {
        let font_ctxs = library
            .faces()
            .iter()
            .map(|face| {
                let mut ctx = parley::FontContext::default();
                ctx.collection.register_fonts(
                    parley::fontique::Blob::from(face.bytes.as_ref().clone()),
                    None,
                );
                ctx
            })
            .collect();
        Self {
            library,
            font_ctxs,
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Build an engine from the fonts found in `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(FontLibrary::load_dir(dir))
    }

    /// The underlying library.
    pub fn library(&self) -> &FontLibrary {
        &self.library
    }

    /// Shape `text` as one unbroken line, or `None` when no face is loaded.
    pub fn shape(&mut self, text: &str, spec: &FontSpec) -> Option<ShapedLine> {
        let face_idx = self.library.resolve(spec)?;
        let family = self.library.faces()[face_idx].family.clone();
        let font_ctx = self.font_ctxs.get_mut(face_idx)?;

        let mut builder = self.layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size as f32));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut shaped = ShapedLine {
            face: face_idx,
            glyphs: Vec::new(),
            width: f64::from(layout.width()),
            ascent: 0.0,
            descent: 0.0,
        };
        for line in layout.lines() {
            let m = line.metrics();
            shaped.ascent = shaped.ascent.max(f64::from(m.ascent));
            shaped.descent = shaped.descent.max(f64::from(m.descent));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                shaped
                    .glyphs
                    .extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y - m.baseline,
                    }));
            }
        }
        Some(shaped)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f64 {
        match self.shape(text, font) {
            Some(line) => line.width,
            None => HeuristicMeasure.measure(text, font),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
