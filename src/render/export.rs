use std::{io::Cursor, path::Path};

use anyhow::Context as _;

use crate::{
    catalog::model::Category,
    foundation::{
        error::{CardError, CardResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::backend::FrameRGBA,
};

/// `"{category}-{YYYY-MM-DD}.png"`.
pub fn export_file_name(category: Category, date: chrono::NaiveDate) -> String {
    format!("{}-{}.png", category.key(), date.format("%Y-%m-%d"))
}

/// Straight-alpha copy of the frame's pixels, as PNG stores them.
fn straight_rgba8(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(CardError::validation(format!(
            "frame buffer is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    Ok(data)
}

/// Encode `frame` as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let data = straight_rgba8(frame)?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| CardError::validation("frame dimensions do not match its buffer"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write `frame` to `path` as PNG, creating parent directories.
#[tracing::instrument(skip(frame), fields(path = %path.display()))]
pub fn export_png(frame: &FrameRGBA, path: &Path) -> CardResult<()> {
    let data = straight_rgba8(frame)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!("card exported");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
