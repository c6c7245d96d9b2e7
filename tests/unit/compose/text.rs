use super::*;
use crate::{
    catalog::{model::Category, templates},
    foundation::core::CanvasFormat,
    text::{
        fonts::{HeuristicMeasure, TextLayoutEngine},
        tiers::select_tier,
        wrap::wrap_lines,
    },
};

fn fixture_engine() -> TextLayoutEngine {
    TextLayoutEngine::from_dir(std::path::Path::new("tests/data/fonts"))
}

fn quote_of(len: usize) -> String {
    let word = "lumière ";
    let mut s = word.repeat(len / word.chars().count() + 1);
    s = s.chars().take(len).collect();
    s
}

fn texts(ops: &[DrawOp]) -> Vec<String> {
    let mut out = Vec::new();
    for op in ops {
        op.walk(&mut |o| {
            if let Some(t) = o.as_text() {
                out.push(t.to_string());
            }
        });
    }
    out
}

fn run(category: Category, index: usize, state: &RenderState) -> Vec<DrawOp> {
    let t = templates::get(category, index).unwrap();
    ops(t, state, state.canvas(), &mut HeuristicMeasure).unwrap()
}

#[test]
fn circular_with_empty_author_skips_author_and_wraps_quote() {
    let state = RenderState {
        title: "Pensée du Jour".to_string(),
        quote: quote_of(120),
        author: String::new(),
        ..RenderState::default()
    };
    let t = templates::get(Category::Jour, 0).unwrap();
    assert_eq!(t.frame_style, FrameStyle::Circular);

    let input = TextInput {
        template: t,
        state: &state,
        canvas: state.canvas(),
    };
    let layout = classic_layout(&input, &mut HeuristicMeasure);
    assert!(layout.quote.lines.len() >= 2);
    assert_eq!(layout.author_y, None);

    let lines = texts(&run(Category::Jour, 0, &state));
    assert_eq!(lines[0], "Pensée du Jour");
    assert!(lines.iter().all(|l| !l.starts_with('—')));
}

#[test]
fn circular_author_sits_inside_the_ring() {
    let state = RenderState {
        author: "Saint Augustin".to_string(),
        ..RenderState::default()
    };
    let t = templates::get(Category::Jour, 0).unwrap();
    let input = TextInput {
        template: t,
        state: &state,
        canvas: state.canvas(),
    };
    let layout = classic_layout(&input, &mut HeuristicMeasure);
    // 512 + 400 - 24 - 60
    assert_eq!(layout.author_y, Some(828.0));

    let elegant = templates::get(Category::Jour, 2).unwrap();
    let input = TextInput {
        template: elegant,
        ..input
    };
    assert_eq!(
        classic_layout(&input, &mut HeuristicMeasure).author_y,
        Some(824.0)
    );
    assert!(texts(&run(Category::Jour, 2, &state)).contains(&"— Saint Augustin".to_string()));
}

#[test]
fn classic_title_and_underline_positions() {
    let state = RenderState::default();
    let t = templates::get(Category::Saint, 0).unwrap();
    let input = TextInput {
        template: t,
        state: &state,
        canvas: CanvasFormat::Square.canvas(),
    };
    let layout = classic_layout(&input, &mut HeuristicMeasure);
    assert!((layout.title_y - 199.68).abs() < 1e-9);
    assert_eq!(layout.underline.width(), 200.0);
    assert_eq!(layout.underline.height(), 3.0);
}

#[test]
fn banner_simple_has_no_text_and_others_are_shadowed() {
    let state = RenderState {
        title: "Sainte Thérèse".to_string(),
        quote: "Aimer c'est tout donner".to_string(),
        author: "Thérèse de Lisieux".to_string(),
        ..RenderState::default()
    };
    assert!(run(Category::Ciel, 0, &state).is_empty());

    let with_title = run(Category::Ciel, 1, &state);
    assert_eq!(with_title.len(), 1);
    let DrawOp::Shadowed { shadow, ops } = &with_title[0] else {
        panic!("expected shadow group");
    };
    assert_eq!(shadow.color, Rgba8::rgba(0, 0, 0, 204));
    assert_eq!(shadow.blur, 10.0);
    let DrawOp::Text { y, font, .. } = &ops[0] else {
        panic!("expected title");
    };
    assert_eq!(*y, 1024.0 - 100.0 - 60.0);
    assert!(font.bold);

    let lines = texts(&run(Category::Ciel, 2, &state));
    assert_eq!(lines.first().map(String::as_str), Some("“Aimer c'est tout donner”"));
    assert_eq!(lines.last().map(String::as_str), Some("— Thérèse de Lisieux"));
}

#[test]
fn verse_pushes_title_up_as_text_grows() {
    let short = RenderState {
        title: "Le Bon Berger".to_string(),
        quote: quote_of(80),
        author: "Jean 10, 11".to_string(),
        ..RenderState::for_category(Category::Evangile)
    };
    let long = RenderState {
        quote: quote_of(320),
        ..short.clone()
    };
    let t = templates::get(Category::Evangile, 1).unwrap();
    let canvas = CanvasFormat::Square.canvas();
    let a = verse_layout(
        &TextInput {
            template: t,
            state: &short,
            canvas,
        },
        &mut HeuristicMeasure,
    );
    let b = verse_layout(
        &TextInput {
            template: t,
            state: &long,
            canvas,
        },
        &mut HeuristicMeasure,
    );
    assert_eq!(a.reference_y, 969.0);
    assert_eq!(a.verse_font.size, 22.0);
    assert_eq!(b.verse_font.size, 17.0);
    assert!(b.lines > a.lines);
    assert!(b.title_y < a.title_y);
    assert_eq!(
        b.verse_start,
        b.reference_y - 40.0 - b.lines as f64 * b.line_height
    );
    assert_eq!(a.title_y, a.verse_start - 60.0);
}

#[test]
fn narrative_long_text_uses_smallest_tier_and_stays_above_reference() {
    let state = RenderState {
        title: "La Multiplication des Pains".to_string(),
        quote: quote_of(1300),
        author: "Jean 6, 1-15".to_string(),
        ..RenderState::for_category(Category::Evangile)
    };
    let t = templates::get(Category::Evangile, 2).unwrap();
    for format in CanvasFormat::ALL {
        let state = RenderState {
            format,
            ..state.clone()
        };
        let canvas = state.canvas();
        let layout = narrative_layout(
            &TextInput {
                template: t,
                state: &state,
                canvas,
            },
            &mut HeuristicMeasure,
        );
        assert!(select_tier(NARRATIVE_TIERS, 1300).size <= 14);
        assert!(layout.body_font.size <= resolve_size(14.0, 0, canvas));
        let pad = canvas.scale(12.0);
        assert!(layout.clip_bottom <= layout.reference_y - layout.reference_size - pad);
        assert!(layout.body_top < layout.clip_bottom, "{format:?}");

        let ops = ops(t, &state, canvas, &mut HeuristicMeasure).unwrap();
        let mut clip = None;
        for op in &ops {
            op.walk(&mut |o| {
                if let DrawOp::PushClip { rect } = o {
                    clip = Some(*rect);
                }
            });
        }
        let clip = clip.expect("narrative body is clipped");
        assert_eq!(clip.y1, layout.clip_bottom);
        assert_eq!(clip.y0, layout.body_top);
    }
}

#[test]
fn narrative_shrink_respects_floors() {
    let state = RenderState {
        title: "Titre ".repeat(40),
        quote: quote_of(3000),
        author: "Luc 15".to_string(),
        format: CanvasFormat::Landscape,
        ..RenderState::for_category(Category::Evangile)
    };
    let t = templates::get(Category::Evangile, 2).unwrap();
    let layout = narrative_layout(
        &TextInput {
            template: t,
            state: &state,
            canvas: state.canvas(),
        },
        &mut HeuristicMeasure,
    );
    assert!(layout.body_font.size >= NARRATIVE_MIN_FONT.min(14.0 * 576.0 / 1024.0).floor());
    assert!(layout.line_height >= layout.body_font.size + 3.0);
}

#[test]
fn gospel_text_uses_strong_shadow_and_gold_reference() {
    let state = RenderState {
        title: "Les Noces de Cana".to_string(),
        author: "Jean 2, 1-11".to_string(),
        ..RenderState::for_category(Category::Evangile)
    };
    let ops = run(Category::Evangile, 0, &state);
    let DrawOp::Shadowed { shadow, ops } = &ops[0] else {
        panic!("expected shadow group");
    };
    assert_eq!(shadow.color.a, 255);
    assert_eq!(shadow.blur, 12.0);
    let Some(DrawOp::Text { color, y, .. }) = ops.last() else {
        panic!("expected reference");
    };
    assert_eq!(*color, GOSPEL_GOLD);
    assert_eq!(*y, 1024.0 - 60.0);
}

#[test]
fn font_override_applies_to_every_role() {
    let state = RenderState {
        author: "Moi".to_string(),
        font_family: Some("Lora".to_string()),
        ..RenderState::default()
    };
    for op in run(Category::Saint, 2, &state) {
        if let DrawOp::Text { font, .. } = op {
            assert_eq!(font.family, "Lora");
        }
    }
}

#[test]
fn gospel_simple_one_line_title_keeps_its_slot() {
    let state = RenderState {
        title: "Les Noces de Cana".to_string(),
        ..RenderState::for_category(Category::Evangile)
    };
    let t = templates::get(Category::Evangile, 0).unwrap();
    let layout = gospel_simple_layout(
        &TextInput {
            template: t,
            state: &state,
            canvas: state.canvas(),
        },
        &mut HeuristicMeasure,
    );
    assert_eq!(layout.title.lines.len(), 1);
    assert_eq!(layout.title.lines[0].y, 1024.0 - 130.0);
    assert_eq!(layout.reference_y, 1024.0 - 60.0);
}

#[test]
fn gospel_simple_long_title_grows_upward_above_reference() {
    let t = templates::get(Category::Evangile, 0).unwrap();
    for format in CanvasFormat::ALL {
        let state = RenderState {
            format,
            title: "Le Seigneur est mon berger, je ne manque de rien ".repeat(5),
            author: "Psaume 23".to_string(),
            ..RenderState::for_category(Category::Evangile)
        };
        let canvas = state.canvas();
        let layout = gospel_simple_layout(
            &TextInput {
                template: t,
                state: &state,
                canvas,
            },
            &mut HeuristicMeasure,
        );
        assert!(layout.title.lines.len() >= 3, "{format:?}");
        assert!(
            layout.title.end_y <= layout.reference_y - canvas.scale(30.0) + 1e-9,
            "{format:?}: title ends at {} with reference at {}",
            layout.title.end_y,
            layout.reference_y
        );
        assert!(layout.title.lines[0].y >= 0.0);
        assert!(layout.title.lines[0].y < canvas.h() - canvas.scale(130.0));

        let drawn = ops(t, &state, canvas, &mut HeuristicMeasure).unwrap();
        let DrawOp::Shadowed { ops: inner, .. } = &drawn[0] else {
            panic!("expected shadow group");
        };
        let ys: Vec<f64> = inner
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.last(), Some(&layout.reference_y));
        assert!(ys[..ys.len() - 1].iter().all(|y| *y < layout.reference_y));
    }
}

#[test]
fn verse_line_count_follows_measured_glyph_widths() {
    let mut engine = fixture_engine();
    let t = templates::get(Category::Evangile, 1).unwrap();
    let layout_for = |quote: String, measure: &mut dyn TextMeasure| {
        let state = RenderState {
            quote,
            ..RenderState::for_category(Category::Evangile)
        };
        verse_layout(
            &TextInput {
                template: t,
                state: &state,
                canvas: state.canvas(),
            },
            measure,
        )
    };

    // Same character count, very different advance widths.
    let narrow = "il lit ".repeat(24);
    let wide = "MWM WMW ".repeat(21);
    assert_eq!(narrow.chars().count(), wide.chars().count());

    let h_narrow = layout_for(narrow.clone(), &mut HeuristicMeasure);
    let h_wide = layout_for(wide.clone(), &mut HeuristicMeasure);
    assert_eq!(h_narrow.lines, h_wide.lines);

    let r_narrow = layout_for(narrow.clone(), &mut engine);
    let r_wide = layout_for(wide, &mut engine);
    assert!(r_wide.lines > r_narrow.lines, "{} vs {}", r_wide.lines, r_narrow.lines);
    assert!(r_wide.verse_start < r_narrow.verse_start);

    let expected = wrap_lines(&narrow, r_narrow.max_width, &r_narrow.verse_font, &mut engine);
    assert_eq!(r_narrow.lines, expected.len());
}
