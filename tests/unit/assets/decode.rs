use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100u8, 50, 200, 128, 9, 9, 9, 0]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 1));
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn straight_buffer_length_is_checked() {
    assert!(DecodedImage::from_straight_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_straight_rgba8(0, 2, vec![]).is_err());
    assert!(DecodedImage::from_straight_rgba8(1, 1, vec![1, 2, 3, 255]).is_ok());
}
