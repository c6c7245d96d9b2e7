use super::*;
use crate::foundation::core::CanvasFormat;

#[test]
fn resolve_size_never_drops_below_floor() {
    for format in CanvasFormat::ALL {
        let canvas = format.canvas();
        for base in [8u32, 12, 17, 24, 32, 48, 56] {
            for offset in -20..=20 {
                let size = resolve_size(f64::from(base), offset, canvas);
                assert!(size >= MIN_FONT_PX, "{base} {offset} {format:?}");
            }
        }
    }
}

#[test]
fn resolve_size_engages_floor_for_large_negative_offset() {
    let square = CanvasFormat::Square.canvas();
    assert_eq!(resolve_size(24.0, -20, square), 8.0);
    assert_eq!(resolve_size(48.0, 4, square), 52.0);
    assert_eq!(resolve_size(48.0, 0, CanvasFormat::Portrait.canvas()), 27.0);
}

#[test]
fn resolve_font_prefers_non_blank_override() {
    assert_eq!(resolve_font("Inter", None), "Inter");
    assert_eq!(resolve_font("Inter", Some("  ")), "Inter");
    assert_eq!(resolve_font("Inter", Some("Lora")), "Lora");
}

#[test]
fn generic_family_classifies_known_names() {
    assert_eq!(generic_family("playfair display"), GenericFamily::Serif);
    assert_eq!(generic_family("Dancing Script"), GenericFamily::Script);
    assert_eq!(generic_family("Inter"), GenericFamily::SansSerif);
}

#[test]
fn heuristic_measure_scales_with_chars_and_weight() {
    let mut m = HeuristicMeasure;
    let regular = FontSpec::new("Inter", 20.0);
    assert_eq!(m.measure("abcd", &regular), 40.0);
    assert_eq!(m.measure("abcd", &regular.clone().bold()), 44.0);
    assert_eq!(m.measure("", &regular), 0.0);
}

#[test]
fn empty_library_resolves_nothing_and_engine_falls_back() {
    let lib = FontLibrary::new();
    assert!(lib.is_empty());
    assert_eq!(lib.resolve(&FontSpec::new("Inter", 12.0)), None);

    let mut engine = TextLayoutEngine::default();
    let spec = FontSpec::new("Inter", 10.0);
    assert!(engine.shape("hello", &spec).is_none());
    assert_eq!(engine.measure("hello", &spec), HeuristicMeasure.measure("hello", &spec));
}

#[test]
fn garbage_bytes_are_rejected() {
    let mut lib = FontLibrary::new();
    assert!(lib.add_bytes(vec![0, 1, 2, 3], false, false).is_err());
    assert!(lib.is_empty());
}

#[test]
fn load_dir_of_missing_directory_is_empty() {
    let lib = FontLibrary::load_dir(Path::new("/definitely/not/a/font/dir"));
    assert!(lib.is_empty());
}

fn fixture_library() -> FontLibrary {
    FontLibrary::load_dir(Path::new("tests/data/fonts"))
}

#[test]
fn fixture_dir_registers_families_and_styles() {
    let lib = fixture_library();
    assert_eq!(lib.len(), 3);
    let families: Vec<&str> = lib.faces().iter().map(|f| f.family.as_str()).collect();
    assert!(families.contains(&"DejaVu Sans"), "{families:?}");
    assert!(families.contains(&"DejaVu Serif"), "{families:?}");

    let bold = lib.resolve(&FontSpec::new("dejavu sans", 20.0).bold()).unwrap();
    assert!(lib.faces()[bold].bold);
    assert_eq!(lib.faces()[bold].family, "DejaVu Sans");

    let regular = lib.resolve(&FontSpec::new("DejaVu Sans", 20.0)).unwrap();
    assert!(!lib.faces()[regular].bold);
    assert_eq!(lib.faces()[regular].family, "DejaVu Sans");

    let serif = lib.resolve(&FontSpec::new("DejaVu Serif", 20.0).bold()).unwrap();
    assert_eq!(lib.faces()[serif].family, "DejaVu Serif");

    // Unknown families still land on a loaded face.
    assert!(lib.resolve(&FontSpec::new("Playfair Display", 20.0)).is_some());
}

#[test]
fn add_file_reports_declared_family() {
    let mut lib = FontLibrary::new();
    let family = lib
        .add_file(Path::new("tests/data/fonts/DejaVuSerif.ttf"))
        .unwrap();
    assert_eq!(family, "DejaVu Serif");
    assert!(!lib.faces()[0].bold && !lib.faces()[0].italic);
}

#[test]
fn shaped_widths_grow_with_text_and_differ_from_heuristic() {
    let mut engine = TextLayoutEngine::new(fixture_library());
    let spec = FontSpec::new("DejaVu Sans", 24.0);
    let text = "Pensée du jour, lumière du monde";

    let mut prev = 0.0;
    for end in text.char_indices().map(|(i, _)| i).skip(1) {
        let w = engine.measure(&text[..end], &spec);
        assert!(w >= prev, "'{}' measured {w} < {prev}", &text[..end]);
        prev = w;
    }
    let full = engine.measure(text, &spec);
    assert!(full > prev);

    assert!(engine.measure("WWWW", &spec) > engine.measure("iiii", &spec) * 2.0);
    assert_eq!(
        HeuristicMeasure.measure("WWWW", &spec),
        HeuristicMeasure.measure("iiii", &spec)
    );
    assert!(engine.measure("Amen", &spec.clone().bold()) > engine.measure("Amen", &spec));
}

#[test]
fn shaped_line_carries_glyphs_and_metrics() {
    let mut engine = TextLayoutEngine::new(fixture_library());
    let spec = FontSpec::new("DejaVu Sans", 32.0);
    let line = engine.shape("Amen", &spec).unwrap();
    assert_eq!(line.glyphs.len(), 4);
    assert!(line.ascent > 0.0 && line.descent > 0.0);
    assert!(line.ascent < 32.0 * 1.5);
    assert!(line.glyphs.windows(2).all(|g| g[1].x > g[0].x));
    assert!(line.glyphs.iter().all(|g| g.y.abs() < 1e-3));
    assert!(f64::from(line.glyphs[3].x) < line.width);
}
