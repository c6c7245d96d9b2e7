use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn half_black_over_white_is_mid_grey() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 127).abs() <= 1);
}

#[test]
fn over_in_place_rejects_length_mismatch() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn offset_composite_shifts_and_drops_outside_pixels() {
    let (w, h) = (3u32, 2u32);
    let mut src = vec![0u8; 24];
    // (0,0) and (2,1)
    src[0..4].copy_from_slice(&[255, 0, 0, 255]);
    src[20..24].copy_from_slice(&[0, 255, 0, 255]);
    let mut dst = vec![0u8; 24];
    over_offset_in_place(&mut dst, &src, w, h, 1, 1).unwrap();

    // (0,0) lands on (1,1); (2,1) falls off the bottom-right.
    assert_eq!(&dst[16..20], &[255, 0, 0, 255]);
    let opaque = dst.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert_eq!(opaque, 1);
}

#[test]
fn tint_keeps_coverage_and_replaces_color() {
    let src = [10u8, 200, 30, 255, 0, 0, 0, 0, 50, 50, 50, 128];
    let out = tint_coverage(&src, [0, 0, 0, 204]);
    assert_eq!(&out[0..4], &[0, 0, 0, 204]);
    assert_eq!(&out[4..8], &[0, 0, 0, 0]);
    assert_eq!(out[11], 102);
}
