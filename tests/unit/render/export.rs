use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 64, 0, 128],
        premultiplied: true,
    }
}

#[test]
fn file_name_uses_category_key_and_iso_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(export_file_name(Category::Evangile, date), "evangile-2024-03-07.png");
    assert_eq!(export_file_name(Category::Jour, date), "jour-2024-03-07.png");
}

#[test]
fn png_round_trips_straight_alpha() {
    let bytes = encode_png(&frame()).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 128, 0, 128]);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let mut f = frame();
    f.data.pop();
    assert!(matches!(encode_png(&f), Err(CardError::Validation(_))));
}

#[test]
fn export_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("quotecard-export-{}", std::process::id()));
    let path = dir.join("nested").join("card.png");
    export_png(&frame(), &path).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
