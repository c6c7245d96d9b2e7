//! Embedded template catalog: three styles per category plus the background galleries.

use crate::{
    catalog::model::{Category, FrameStyle, GalleryImage, Template},
    foundation::{
        color::Rgba8,
        error::{CardError, CardResult},
    },
};

const GOLD: Rgba8 = Rgba8::rgb(0xd4, 0xaf, 0x37);
const SUN: Rgba8 = Rgba8::rgb(0xff, 0xd6, 0x0a);

const PLAYFAIR: &str = "Playfair Display";
const INTER: &str = "Inter";

static JOUR: [Template; 3] = [
    Template {
        id: "jour-1",
        name: "Minimaliste Élégant",
        category: Category::Jour,
        frame_style: FrameStyle::Circular,
        default_background: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 48,
        quote_font: INTER,
        quote_size: 32,
        author_font: INTER,
        author_size: 24,
    },
    Template {
        id: "jour-2",
        name: "Géométrique Moderne",
        category: Category::Jour,
        frame_style: FrameStyle::Geometric,
        default_background: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: INTER,
        title_size: 44,
        quote_font: INTER,
        quote_size: 30,
        author_font: INTER,
        author_size: 22,
    },
    Template {
        id: "jour-3",
        name: "Artistique Lumineux",
        category: Category::Jour,
        frame_style: FrameStyle::Elegant,
        default_background: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 46,
        quote_font: INTER,
        quote_size: 31,
        author_font: PLAYFAIR,
        author_size: 23,
    },
];

static SAINT: [Template; 3] = [
    Template {
        id: "saint-1",
        name: "Spirituel Sophistiqué",
        category: Category::Saint,
        frame_style: FrameStyle::Ornate,
        default_background: "https://images.unsplash.com/photo-1548625149-fc4a29cf7092?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 50,
        quote_font: INTER,
        quote_size: 32,
        author_font: PLAYFAIR,
        author_size: 26,
    },
    Template {
        id: "saint-2",
        name: "Contemporain Sacré",
        category: Category::Saint,
        frame_style: FrameStyle::GeometricSacred,
        default_background: "https://images.unsplash.com/photo-1519817914152-22d216bb9170?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: INTER,
        title_size: 46,
        quote_font: INTER,
        quote_size: 30,
        author_font: INTER,
        author_size: 24,
    },
    Template {
        id: "saint-3",
        name: "Raffiné Céleste",
        category: Category::Saint,
        frame_style: FrameStyle::Elegant,
        default_background: "https://images.unsplash.com/photo-1464802686167-b939a6910659?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 48,
        quote_font: INTER,
        quote_size: 31,
        author_font: PLAYFAIR,
        author_size: 25,
    },
];

static CIEL: [Template; 3] = [
    Template {
        id: "ciel-1",
        name: "Regard Simple",
        category: Category::Ciel,
        frame_style: FrameStyle::BannerSimple,
        default_background: "https://images.unsplash.com/photo-1438232992991-995b7058bbb3?w=1024&h=1024&fit=crop",
        frame_color: SUN,
        title_font: PLAYFAIR,
        title_size: 56,
        quote_font: PLAYFAIR,
        quote_size: 34,
        author_font: INTER,
        author_size: 26,
    },
    Template {
        id: "ciel-2",
        name: "Regard avec Nom",
        category: Category::Ciel,
        frame_style: FrameStyle::BannerWithTitle,
        default_background: "https://images.unsplash.com/photo-1504551591408-94a57e84ff1e?w=1024&h=1024&fit=crop",
        frame_color: SUN,
        title_font: PLAYFAIR,
        title_size: 56,
        quote_font: PLAYFAIR,
        quote_size: 34,
        author_font: INTER,
        author_size: 26,
    },
    Template {
        id: "ciel-3",
        name: "Regard avec Citation",
        category: Category::Ciel,
        frame_style: FrameStyle::BannerWithQuote,
        default_background: "https://images.unsplash.com/photo-1509423350716-97f9360b4e09?w=1024&h=1024&fit=crop",
        frame_color: SUN,
        title_font: PLAYFAIR,
        title_size: 52,
        quote_font: PLAYFAIR,
        quote_size: 32,
        author_font: INTER,
        author_size: 26,
    },
];

static EVANGILE: [Template; 3] = [
    Template {
        id: "evangile-1",
        name: "Scène Simple",
        category: Category::Evangile,
        frame_style: FrameStyle::GospelSimple,
        default_background: "https://images.unsplash.com/photo-1445810694374-0a94739e4a03?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 32,
        quote_font: INTER,
        quote_size: 18,
        author_font: PLAYFAIR,
        author_size: 24,
    },
    Template {
        id: "evangile-2",
        name: "Verset Illustré",
        category: Category::Evangile,
        frame_style: FrameStyle::GospelVerse,
        default_background: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 24,
        quote_font: PLAYFAIR,
        quote_size: 22,
        author_font: PLAYFAIR,
        author_size: 22,
    },
    Template {
        id: "evangile-3",
        name: "Récit Complet",
        category: Category::Evangile,
        frame_style: FrameStyle::GospelNarrative,
        default_background: "https://images.unsplash.com/photo-1548625149-fc4a29cf7092?w=1024&h=1024&fit=crop",
        frame_color: GOLD,
        title_font: PLAYFAIR,
        title_size: 22,
        quote_font: INTER,
        quote_size: 20,
        author_font: PLAYFAIR,
        author_size: 20,
    },
];

static NATURE_GALLERY: [GalleryImage; 7] = [
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1024&h=1024&fit=crop",
        name: "Montagne au Lever",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=1024&h=1024&fit=crop",
        name: "Océan Doré",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=1024&h=1024&fit=crop",
        name: "Forêt Lumineuse",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?w=1024&h=1024&fit=crop",
        name: "Lac Paisible",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1501785888041-af3ef285b470?w=1024&h=1024&fit=crop",
        name: "Route Inspirante",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1024&h=1024&fit=crop",
        name: "Ciel Étoilé",
        tag: "nature",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1475924156734-496f6cac6ec1?w=1024&h=1024&fit=crop",
        name: "Prairie Dorée",
        tag: "nature",
    },
];

static SPIRITUAL_GALLERY: [GalleryImage; 8] = [
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1548625149-fc4a29cf7092?w=1024&h=1024&fit=crop",
        name: "Cathédrale Divine",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1519817914152-22d216bb9170?w=1024&h=1024&fit=crop",
        name: "Monastère Ancien",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1464802686167-b939a6910659?w=1024&h=1024&fit=crop",
        name: "Nuages Célestes",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1438232992991-995b7058bbb3?w=1024&h=1024&fit=crop",
        name: "Lumière Divine",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1504551591408-94a57e84ff1e?w=1024&h=1024&fit=crop",
        name: "Vitraux Sacrés",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=1024&h=1024&fit=crop",
        name: "Cloître Paisible",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1509423350716-97f9360b4e09?w=1024&h=1024&fit=crop",
        name: "Ciel Mystique",
        tag: "spiritual",
    },
    GalleryImage {
        reference: "https://images.unsplash.com/photo-1445810694374-0a94739e4a03?w=1024&h=1024&fit=crop",
        name: "Chapelle Lumineuse",
        tag: "spiritual",
    },
];

/// Ordered style variants of `category`.
pub fn templates(category: Category) -> &'static [Template] {
    match category {
        Category::Jour => &JOUR,
        Category::Saint => &SAINT,
        Category::Ciel => &CIEL,
        Category::Evangile => &EVANGILE,
    }
}

/// Look up one style variant.
///
/// Fails with [`CardError::OutOfRange`] when `index` is past the end of the category's list;
/// callers switching category must reset their index to 0 rather than rely on clamping here.
pub fn get(category: Category, index: usize) -> CardResult<&'static Template> {
    let list = templates(category);
    list.get(index).ok_or_else(|| CardError::OutOfRange {
        category: category.key().to_string(),
        index,
        len: list.len(),
    })
}

/// Background gallery offered for `category`.
pub fn gallery(category: Category) -> &'static [GalleryImage] {
    match category {
        Category::Jour => &NATURE_GALLERY,
        Category::Saint | Category::Ciel | Category::Evangile => &SPIRITUAL_GALLERY,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/templates.rs"]
mod tests;
