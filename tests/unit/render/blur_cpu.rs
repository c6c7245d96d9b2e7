use super::*;

fn single_dot(w: u32, h: u32, x: u32, y: u32) -> Vec<u8> {
    let mut src = vec![0u8; (w * h * 4) as usize];
    let idx = ((y * w + x) * 4) as usize;
    src[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
    src
}

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let src = single_dot(5, 5, 2, 2);
    let out = blur_rgba8_premul(&src, 5, 5, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    let err = blur_rgba8_premul(&[0u8; 7], 1, 2, 1, 1.0).unwrap_err();
    assert!(matches!(err, CardError::Draw(_)));
}

#[test]
fn sparse_blur_matches_full_blur() {
    let (w, h) = (24u32, 16u32);
    let mut src = single_dot(w, h, 9, 7);
    let idx = ((8 * w + 14) * 4) as usize;
    src[idx..idx + 4].copy_from_slice(&[0, 0, 128, 128]);

    let full = blur_rgba8_premul(&src, w, h, 3, 1.5).unwrap();
    let sparse = blur_rgba8_premul_sparse(&src, w, h, 3, 1.5).unwrap();
    assert_eq!(full, sparse);
}

#[test]
fn sparse_blur_of_empty_layer_is_empty() {
    let src = vec![0u8; 8 * 8 * 4];
    let out = blur_rgba8_premul_sparse(&src, 8, 8, 4, 2.0).unwrap();
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn alpha_bounds_cover_visible_pixels_only() {
    let src = single_dot(6, 4, 4, 1);
    assert_eq!(alpha_bounds(&src, 6, 4), Some((4, 1, 4, 1)));
    assert_eq!(alpha_bounds(&[0u8; 16], 2, 2), None);
}

#[test]
fn shadow_params_follow_half_blur_sigma() {
    assert_eq!(shadow_blur_params(0.0), (0, 1.0));
    assert_eq!(shadow_blur_params(-3.0).0, 0);
    assert_eq!(shadow_blur_params(10.0), (15, 5.0));
    let (r, s) = shadow_blur_params(4.5);
    assert_eq!(r, 7);
    assert!((s - 2.25).abs() < 1e-6);
}
