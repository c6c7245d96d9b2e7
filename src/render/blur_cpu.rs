use crate::foundation::error::{CardError, CardResult};

/// Kernel radius and sigma for a shadow of `blur` canvas pixels.
///
/// Matches the usual 2D-canvas `shadowBlur` convention: `sigma = blur / 2`, kernel
/// truncated at three sigmas.
pub fn shadow_blur_params(blur: f64) -> (u32, f32) {
    if !blur.is_finite() || blur <= 0.0 {
        return (0, 1.0);
    }
    let sigma = blur / 2.0;
    ((sigma * 3.0).ceil() as u32, sigma as f32)
}

pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CardResult<Vec<u8>> {
    let expected_len = buffer_len(width, height)?;
    if src.len() != expected_len {
        return Err(CardError::draw(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blur only the area around non-transparent pixels.
///
/// Produces the same pixels as [`blur_rgba8_premul`] on sparse layers (text, logos) while
/// touching a fraction of the canvas.
pub fn blur_rgba8_premul_sparse(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CardResult<Vec<u8>> {
    let expected_len = buffer_len(width, height)?;
    if src.len() != expected_len {
        return Err(CardError::draw(
            "blur_rgba8_premul_sparse expects src matching width*height*4",
        ));
    }
    let Some((x0, y0, x1, y1)) = alpha_bounds(src, width, height) else {
        return Ok(vec![0u8; expected_len]);
    };
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let x0 = x0.saturating_sub(radius);
    let y0 = y0.saturating_sub(radius);
    let x1 = (x1 + radius).min(width - 1);
    let y1 = (y1 + radius).min(height - 1);
    let (cw, ch) = (x1 - x0 + 1, y1 - y0 + 1);

    let mut crop = Vec::with_capacity(buffer_len(cw, ch)?);
    for y in y0..=y1 {
        let start = (y as usize * width as usize + x0 as usize) * 4;
        crop.extend_from_slice(&src[start..start + cw as usize * 4]);
    }
    let blurred = blur_rgba8_premul(&crop, cw, ch, radius, sigma)?;

    let mut out = vec![0u8; expected_len];
    for (row, y) in (y0..=y1).enumerate() {
        let start = (y as usize * width as usize + x0 as usize) * 4;
        let row_len = cw as usize * 4;
        out[start..start + row_len].copy_from_slice(&blurred[row * row_len..(row + 1) * row_len]);
    }
    Ok(out)
}

/// Inclusive bounding box `(x0, y0, x1, y1)` of pixels with non-zero alpha.
pub(crate) fn alpha_bounds(src: &[u8], width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize * width as usize + x as usize) * 4;
            if src[idx + 3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((bx0, by0, bx1, by1)) => (bx0.min(x), by0.min(y), bx1.max(x), by1.max(y)),
            });
        }
    }
    bounds
}

fn buffer_len(width: u32, height: u32) -> CardResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::draw("blur buffer size overflow"))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CardResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CardError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(CardError::draw("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap so the kernel sums to exactly 1.0 in q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur_cpu.rs"]
mod tests;
