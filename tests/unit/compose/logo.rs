use std::io::Cursor;

use super::*;
use crate::{
    assets::loader::MemoryImageLoader, catalog::model::FrameStyle, compose::frame::cutout_border,
    foundation::core::CanvasFormat,
};

fn png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn settings() -> RenderSettings {
    RenderSettings::default()
}

fn anchor_for(style: FrameStyle, state: &RenderState) -> LogoAnchor {
    LogoAnchor::for_style(state.canvas(), style)
}

fn image_center(ops: &[DrawOp]) -> Option<(f64, f64)> {
    let mut found = None;
    for op in ops {
        op.walk(&mut |o| {
            if let DrawOp::Image { dest, .. } = o {
                let c = dest.center();
                found = Some((c.x, c.y));
            }
        });
    }
    found
}

#[test]
fn state_logo_wins_over_default() {
    let s = settings();
    let mut state = RenderState::default();
    assert_eq!(logo_reference(&state, &s), s.default_logo);
    state.logo = Some("custom.png".to_string());
    assert_eq!(logo_reference(&state, &s), "custom.png");
    state.logo = Some("  ".to_string());
    assert_eq!(logo_reference(&state, &s), s.default_logo);
}

#[test]
fn logo_center_matches_frame_cutout_anchor_for_every_format() {
    let s = settings();
    let loader = MemoryImageLoader::new().with(s.default_logo.clone(), png());
    for format in CanvasFormat::ALL {
        let state = RenderState {
            format,
            ..RenderState::default()
        };
        let canvas = state.canvas();
        let anchor = LogoAnchor::for_style(canvas, FrameStyle::Geometric);
        let logo = ops(anchor, &state, canvas, &loader, &s);
        assert!(logo.fallback.is_none());
        let (x, y) = image_center(&logo.ops).expect("logo image drawn");

        assert_eq!((x, y), (anchor.x, anchor.y), "{format:?}");

        // The frame's inner cutout corner is derived from the same anchor.
        let cutout = anchor.radius + canvas.scale(10.0);
        let path = cutout_border(canvas, canvas.scale(60.0), &anchor);
        let corner = kurbo::Point::new(x - cutout, y - cutout);
        assert!(
            path.elements()
                .iter()
                .any(|el| matches!(el, kurbo::PathEl::QuadTo(c, _) if *c == corner))
        );
    }
}

#[test]
fn image_is_clipped_to_circle_inside_white_glow() {
    let s = settings();
    let loader = MemoryImageLoader::new().with(s.default_logo.clone(), png());
    let state = RenderState::default();
    let logo = ops(
        anchor_for(FrameStyle::Elegant, &state),
        &state,
        state.canvas(),
        &loader,
        &s,
    );
    assert_eq!(logo.ops.len(), 1);
    let DrawOp::Shadowed { shadow, ops } = &logo.ops[0] else {
        panic!("expected glow group");
    };
    assert_eq!(shadow.color, Rgba8::rgba(255, 255, 255, 204));
    assert_eq!(shadow.blur, 15.0);
    let DrawOp::Image { clip, dest, .. } = &ops[0] else {
        panic!("expected image");
    };
    assert_eq!(clip.map(|c| c.radius), Some(40.0));
    assert_eq!(dest.width(), 80.0);
}

#[test]
fn banner_logo_gets_backing_disc_top_right() {
    let s = settings();
    let loader = MemoryImageLoader::new().with(s.default_logo.clone(), png());
    let state = RenderState::default();
    let logo = ops(
        anchor_for(FrameStyle::BannerWithTitle, &state),
        &state,
        state.canvas(),
        &loader,
        &s,
    );
    assert!(matches!(
        &logo.ops[0],
        DrawOp::FillPath {
            paint: Paint::Solid(Rgba8::WHITE),
            ..
        }
    ));
    assert_eq!(image_center(&logo.ops), Some((959.0, 65.0)));
}

#[test]
fn load_failure_draws_badge_in_frame_color() {
    let s = settings();
    let state = RenderState {
        frame_color: Rgba8::rgb(1, 2, 3),
        ..RenderState::default()
    };
    let logo = ops(
        anchor_for(FrameStyle::Ornate, &state),
        &state,
        state.canvas(),
        &MemoryImageLoader::new(),
        &s,
    );
    assert!(logo.fallback.as_ref().is_some_and(CardError::is_asset_load));
    let DrawOp::Shadowed { shadow, ops } = &logo.ops[0] else {
        panic!("expected glow group");
    };
    assert_eq!(shadow.blur, 10.0);
    let DrawOp::Text {
        text, color, font, x, y, ..
    } = &ops[0]
    else {
        panic!("expected badge text");
    };
    assert_eq!(text, "VDS");
    assert_eq!(*color, Rgba8::rgb(1, 2, 3));
    assert!(font.bold);
    assert_eq!(font.size, 28.0);
    assert_eq!((*x, *y), (934.0, 954.0));
}
