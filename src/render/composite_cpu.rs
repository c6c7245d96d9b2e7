use crate::foundation::error::{CardError, CardResult};

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> CardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CardError::draw(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` shifted by `(dx, dy)` pixels; pixels pushed past the edge are dropped.
pub fn over_offset_in_place(
    dst: &mut [u8],
    src: &[u8],
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
) -> CardResult<()> {
    if dst.len() != src.len() || dst.len() != width as usize * height as usize * 4 {
        return Err(CardError::draw(
            "over_offset_in_place expects width*height*4 rgba8 buffers",
        ));
    }
    if dx == 0 && dy == 0 {
        return over_in_place(dst, src, 1.0);
    }
    let (w, h) = (width as i32, height as i32);
    for sy in 0..h {
        let ty = sy + dy;
        if !(0..h).contains(&ty) {
            continue;
        }
        for sx in 0..w {
            let tx = sx + dx;
            if !(0..w).contains(&tx) {
                continue;
            }
            let si = ((sy * w + sx) as usize) * 4;
            let ti = ((ty * w + tx) as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [dst[ti], dst[ti + 1], dst[ti + 2], dst[ti + 3]];
            dst[ti..ti + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
    Ok(())
}

/// Replace every pixel's color with `color` (premultiplied), keeping its coverage.
///
/// Turns a rendered layer into the silhouette a shadow is cast from.
pub fn tint_coverage(src: &[u8], color: PremulRgba8) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    for (o, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 0 {
            continue;
        }
        for c in 0..4 {
            o[c] = mul_div255(u16::from(color[c]), a);
        }
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite_cpu.rs"]
mod tests;
