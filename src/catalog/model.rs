use crate::foundation::color::Rgba8;

/// Content category; each owns an ordered list of style variants.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// "Pensée du Jour".
    Jour,
    /// "Pensée de Saint".
    Saint,
    /// "Un Regard au Ciel" banner cards.
    Ciel,
    /// "L'Évangile Illustré" long-form cards.
    Evangile,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 4] = [Self::Jour, Self::Saint, Self::Ciel, Self::Evangile];

    /// Stable lowercase key, also used in export file names.
    pub fn key(self) -> &'static str {
        match self {
            Self::Jour => "jour",
            Self::Saint => "saint",
            Self::Ciel => "ciel",
            Self::Evangile => "evangile",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Discriminant selecting the frame algorithm and the text layout algorithm.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FrameStyle {
    /// Two concentric rings.
    Circular,
    /// Rectangle with logo cutout and L-shaped corners.
    Geometric,
    /// Double rectangle with logo cutout and corner dots.
    Ornate,
    /// Single diamond.
    GeometricSacred,
    /// Double rectangle with a translucent inner line.
    #[default]
    Elegant,
    /// Bottom band with a label only.
    BannerSimple,
    /// Bottom band with the title above it.
    BannerWithTitle,
    /// Bottom band with quote and author above it.
    BannerWithQuote,
    /// Gradient scrim, title and reference.
    GospelSimple,
    /// Gradient scrim, verse excerpt laid out bottom-up.
    GospelVerse,
    /// Gradient scrim, full narrative text clipped above the reference.
    GospelNarrative,
}

impl FrameStyle {
    /// All styles, in declaration order.
    pub const ALL: [FrameStyle; 11] = [
        Self::Circular,
        Self::Geometric,
        Self::Ornate,
        Self::GeometricSacred,
        Self::Elegant,
        Self::BannerSimple,
        Self::BannerWithTitle,
        Self::BannerWithQuote,
        Self::GospelSimple,
        Self::GospelVerse,
        Self::GospelNarrative,
    ];

    /// Bottom-band family.
    pub fn is_banner(self) -> bool {
        matches!(
            self,
            Self::BannerSimple | Self::BannerWithTitle | Self::BannerWithQuote
        )
    }

    /// Gradient-scrim long-form family.
    pub fn is_gospel(self) -> bool {
        matches!(
            self,
            Self::GospelSimple | Self::GospelVerse | Self::GospelNarrative
        )
    }

    /// Whether this style accepts long-form body text.
    pub fn is_long_form(self) -> bool {
        matches!(self, Self::GospelVerse | Self::GospelNarrative)
    }
}

/// Immutable style descriptor for one category variant.
///
/// Sizes are reference pixels on the 1024×1024 design canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Template {
    /// Stable identifier (`"jour-1"`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Owning category.
    pub category: Category,
    /// Frame + text layout discriminant.
    pub frame_style: FrameStyle,
    /// Background reference used when the caller supplies none.
    pub default_background: &'static str,
    /// Suggested frame color.
    pub frame_color: Rgba8,
    /// Title font family.
    pub title_font: &'static str,
    /// Title size in reference pixels.
    pub title_size: u32,
    /// Quote font family.
    pub quote_font: &'static str,
    /// Quote size in reference pixels.
    pub quote_size: u32,
    /// Author font family.
    pub author_font: &'static str,
    /// Author size in reference pixels.
    pub author_size: u32,
}

/// A selectable background from the per-category gallery.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GalleryImage {
    /// Image reference passed to the loader.
    pub reference: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Loose grouping tag.
    pub tag: &'static str,
}
