use super::*;
use crate::catalog::model::FrameStyle;

#[test]
fn defaults_match_editor_start_state() {
    let s = RenderState::default();
    assert_eq!(s.title, "Pensée du Jour");
    assert!(s.author.is_empty());
    assert_eq!(s.frame_color.to_hex(), "#d4af37");
    assert_eq!(s.overlay_opacity_percent, 50);
    assert_eq!(s.format, CanvasFormat::Square);
    assert!((s.overlay_opacity() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn category_defaults() {
    assert_eq!(RenderState::for_category(Category::Saint).title, "Pensée de Saint");
    let ciel = RenderState::for_category(Category::Ciel);
    assert!(ciel.title.is_empty() && ciel.quote.is_empty() && ciel.author.is_empty());
    let ev = RenderState::for_category(Category::Evangile);
    assert_eq!(ev.title, "L'Évangile Illustré");
    assert!(ev.quote.is_empty());
}

#[test]
fn switching_category_keeps_short_form_quote_and_drops_background() {
    let mut s = RenderState {
        quote: "Ma citation".to_string(),
        background: Some("bg.png".to_string()),
        ..RenderState::default()
    };
    s.apply_category(Category::Saint);
    assert_eq!(s.quote, "Ma citation");
    assert_eq!(s.background, None);
}

#[test]
fn generated_title_only_replaces_when_present() {
    let mut s = RenderState::default();
    s.apply_generated("q".into(), "a".into(), None);
    assert_eq!(s.title, "Pensée du Jour");
    s.apply_generated("q".into(), "a".into(), Some("Nouveau".into()));
    assert_eq!((s.quote.as_str(), s.title.as_str()), ("q", "Nouveau"));
}

#[test]
fn json_uses_snake_case_and_css_colors() {
    let json = r##"{
        "title": "T",
        "frame_color": "#fff",
        "overlay_color": "rgba(0, 0, 0, 0.5)",
        "overlay_opacity_percent": 30,
        "font_size_offset": -4,
        "format": "9:16"
    }"##;
    let s: RenderState = serde_json::from_str(json).unwrap();
    assert_eq!(s.title, "T");
    assert_eq!(s.frame_color, crate::foundation::color::Rgba8::WHITE);
    assert_eq!(s.overlay_color.a, 128);
    assert_eq!(s.font_size_offset, -4);
    assert_eq!(s.canvas().width, 576);
    // Unset fields keep their defaults.
    assert_eq!(s.text_color.to_hex(), "#ffffff");

    assert!(serde_json::from_str::<RenderState>(r#"{"colour": "red"}"#).is_err());
}

#[test]
fn validate_enforces_limits() {
    let short = templates::get(Category::Jour, 0).unwrap();
    let long = templates::get(Category::Evangile, 2).unwrap();
    assert_eq!(long.frame_style, FrameStyle::GospelNarrative);

    let ok = RenderState::default();
    assert!(ok.validate(short).is_ok());

    let opacity = RenderState {
        overlay_opacity_percent: 101,
        ..RenderState::default()
    };
    assert!(opacity.validate(short).is_err());

    let narrative = RenderState {
        quote: "x".repeat(1300),
        ..RenderState::default()
    };
    assert!(narrative.validate(short).is_err());
    assert!(narrative.validate(long).is_ok());

    let title = RenderState {
        title: "é".repeat(301),
        ..RenderState::default()
    };
    assert!(matches!(title.validate(short), Err(CardError::Validation(_))));
}

#[test]
fn selection_resets_index_on_category_switch() {
    let mut sel = Selection {
        category: Category::Jour,
        style_index: 2,
    };
    assert_eq!(sel.template().unwrap().id, "jour-3");
    sel.switch_category(Category::Ciel);
    assert_eq!(sel.style_index, 0);
    assert_eq!(sel.template().unwrap().id, "ciel-1");

    let bad = Selection {
        category: Category::Saint,
        style_index: 7,
    };
    assert!(matches!(bad.template(), Err(CardError::OutOfRange { .. })));
}
