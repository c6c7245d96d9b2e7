use std::sync::Arc;

use crate::{
    assets::decode::DecodedImage,
    compose::plan::{CardPlan, Diagnostic, DrawOp, LinearGradient, Paint, Shadow, TextBaseline},
    foundation::{
        color::Rgba8,
        core::{Affine, BezPath, Point, Rect},
        error::{CardError, CardResult},
    },
    render::{
        backend::{Executed, FrameRGBA, RenderBackend, RenderSettings},
        blur_cpu::{blur_rgba8_premul_sparse, shadow_blur_params},
        composite_cpu::{over_in_place, over_offset_in_place, tint_coverage},
    },
    text::fonts::{FontSpec, TextLayoutEngine, TextMeasure},
};

/// CPU backend powered by `vello_cpu` for vector, image and glyph rasterization.
///
/// Each run of ops is rasterized into its own layer and composited over the accumulated
/// target, so shadow groups can blur their content in isolation.
pub struct CpuBackend {
    settings: RenderSettings,
    text: TextLayoutEngine,
    // Families whose text was skipped in the phase being executed.
    missing_faces: Vec<String>,
}

impl CpuBackend {
    /// Backend drawing text with the faces loaded in `text`.
    pub fn new(settings: RenderSettings, text: TextLayoutEngine) -> Self {
        Self {
            settings,
            text,
            missing_faces: Vec::new(),
        }
    }

    /// Settings this backend was built with.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn exec_ops(&mut self, target: &mut [u8], w: u16, h: u16, ops: &[DrawOp]) -> CardResult<()> {
        let mut i = 0;
        while i < ops.len() {
            if let DrawOp::Shadowed { shadow, ops: inner } = &ops[i] {
                self.exec_shadowed(target, w, h, shadow, inner)?;
                i += 1;
                continue;
            }
            let end = ops[i..]
                .iter()
                .position(|op| matches!(op, DrawOp::Shadowed { .. }))
                .map_or(ops.len(), |p| i + p);
            let (layer, result) = self.rasterize(w, h, &ops[i..end]);
            over_in_place(target, &layer, 1.0)?;
            result?;
            i = end;
        }
        Ok(())
    }

    fn exec_shadowed(
        &mut self,
        target: &mut [u8],
        w: u16,
        h: u16,
        shadow: &Shadow,
        ops: &[DrawOp],
    ) -> CardResult<()> {
        let mut content = vec![0u8; target.len()];
        let result = self.exec_ops(&mut content, w, h, ops);

        if shadow.color.a > 0 {
            let silhouette = tint_coverage(&content, shadow.color.to_premul());
            let (radius, sigma) = shadow_blur_params(shadow.blur);
            let blurred = blur_rgba8_premul_sparse(
                &silhouette,
                u32::from(w),
                u32::from(h),
                radius,
                sigma,
            )?;
            over_offset_in_place(
                target,
                &blurred,
                u32::from(w),
                u32::from(h),
                shadow.offset.x.round() as i32,
                shadow.offset.y.round() as i32,
            )?;
        }
        over_in_place(target, &content, 1.0)?;
        result
    }

    /// Rasterize a shadow-free run of ops into a fresh layer.
    ///
    /// The layer holds everything drawn before a failure; the error comes back alongside.
    fn rasterize(&mut self, w: u16, h: u16, ops: &[DrawOp]) -> (Vec<u8>, CardResult<()>) {
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let mut clips = 0usize;
        let mut result = Ok(());
        for op in ops {
            if let Err(err) = self.draw_op(&mut ctx, op, &mut clips) {
                result = Err(err);
                break;
            }
        }
        for _ in 0..clips {
            ctx.pop_layer();
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        (pixmap.data_as_u8_slice().to_vec(), result)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        clips: &mut usize,
    ) -> CardResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillRect { rect, paint } => {
                ensure_finite_rect(*rect)?;
                match paint {
                    Paint::Solid(c) => {
                        ctx.set_paint(color_to_cpu(*c));
                        ctx.fill_rect(&rect_to_cpu(*rect));
                    }
                    Paint::Linear(g) => fill_gradient_rect(ctx, *rect, g)?,
                }
                Ok(())
            }
            DrawOp::FillPath { path, paint } => {
                match paint {
                    Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
                    Paint::Linear(_) => {
                        return Err(CardError::draw("gradient paths are not supported"));
                    }
                }
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::StrokePath { path, color, width } => {
                if !width.is_finite() || *width <= 0.0 {
                    return Err(CardError::draw(format!("invalid stroke width {width}")));
                }
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::Text {
                text,
                font,
                color,
                x,
                y,
                baseline,
            } => self.draw_text(ctx, text, font, *color, *x, *y, *baseline),
            DrawOp::Image { image, dest, clip } => {
                ensure_finite_rect(*dest)?;
                let paint = image_paint(image)?;
                if let Some(circle) = clip {
                    use kurbo::Shape;
                    ctx.push_clip_layer(&bezpath_to_cpu(&circle.to_path(0.1)));
                }
                let tr = Affine::translate((dest.x0, dest.y0))
                    * Affine::scale_non_uniform(
                        dest.width() / f64::from(image.width),
                        dest.height() / f64::from(image.height),
                    );
                ctx.set_transform(affine_to_cpu(tr));
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(image.width),
                    f64::from(image.height),
                ));
                if clip.is_some() {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.pop_layer();
                }
                Ok(())
            }
            DrawOp::PushClip { rect } => {
                ensure_finite_rect(*rect)?;
                ctx.push_clip_layer(&bezpath_to_cpu(&rect_path(*rect)));
                *clips += 1;
                Ok(())
            }
            DrawOp::PopClip => {
                if *clips == 0 {
                    return Err(CardError::draw("PopClip without matching PushClip"));
                }
                ctx.pop_layer();
                *clips -= 1;
                Ok(())
            }
            DrawOp::Shadowed { .. } => Err(CardError::draw(
                "shadow groups must be executed as separate layers",
            )),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        font: &FontSpec,
        color: Rgba8,
        x: f64,
        y: f64,
        baseline: TextBaseline,
    ) -> CardResult<()> {
        if !(x.is_finite() && y.is_finite() && font.size.is_finite()) {
            return Err(CardError::draw(format!("non-finite text position for '{text}'")));
        }
        if text.is_empty() {
            return Ok(());
        }
        let Some(line) = self.text.shape(text, font) else {
            if !self.missing_faces.contains(&font.family) {
                tracing::warn!(family = %font.family, "no font face loaded, skipping text");
                self.missing_faces.push(font.family.clone());
            }
            return Ok(());
        };
        let Some(face) = self.text.library().faces().get(line.face) else {
            return Err(CardError::draw("shaped line references an unknown face"));
        };

        let origin_x = x - line.width / 2.0;
        let baseline_y = match baseline {
            TextBaseline::Top => y + line.ascent,
            TextBaseline::Middle => y + (line.ascent - line.descent) / 2.0,
        };
        ctx.set_transform(affine_to_cpu(Affine::translate((origin_x, baseline_y))));
        ctx.set_paint(color_to_cpu(color));
        let glyphs = line.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(&face.data)
            .font_size(font.size as f32)
            .fill_glyphs(glyphs);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(width = plan.canvas.width, height = plan.canvas.height))]
    fn execute(&mut self, plan: &CardPlan) -> CardResult<Executed> {
        let w: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| CardError::validation("canvas width exceeds u16"))?;
        let h: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| CardError::validation("canvas height exceeds u16"))?;

        let clear = self
            .settings
            .clear_rgba
            .map(|[r, g, b, a]| Rgba8::rgba(r, g, b, a).to_premul())
            .unwrap_or([0; 4]);
        let mut target = clear.repeat(usize::from(w) * usize::from(h));

        let mut diagnostics = Vec::new();
        for phase in &plan.phases {
            self.missing_faces.clear();
            if let Err(err) = self.exec_ops(&mut target, w, h, &phase.ops) {
                tracing::warn!(phase = phase.name, error = %err, "phase stopped early");
                diagnostics.push(Diagnostic::draw_failure(phase.name, err.to_string()));
            }
            diagnostics.extend(self.missing_faces.drain(..).map(|family| {
                Diagnostic::asset_fallback(
                    phase.name,
                    format!("no font face for family '{family}', text skipped"),
                )
            }));
        }

        Ok(Executed {
            frame: FrameRGBA {
                width: plan.canvas.width,
                height: plan.canvas.height,
                data: target,
                premultiplied: true,
            },
            diagnostics,
        })
    }

    fn text_measure(&mut self) -> &mut dyn TextMeasure {
        &mut self.text
    }
}

fn ensure_finite_rect(r: Rect) -> CardResult<()> {
    if [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CardError::draw(format!("non-finite rectangle {r:?}")))
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn rect_path(r: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((r.x0, r.y0));
    path.line_to((r.x1, r.y0));
    path.line_to((r.x1, r.y1));
    path.line_to((r.x0, r.y1));
    path.close_path();
    path
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(image: &DecodedImage) -> CardResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::draw("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::draw("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CardError::draw("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Rasterize `g` over the pixel bounds of `rect` and fill it as an image paint.
fn fill_gradient_rect(
    ctx: &mut vello_cpu::RenderContext,
    rect: Rect,
    g: &LinearGradient,
) -> CardResult<()> {
    let bounds = rect.expand();
    let (x0, y0) = (bounds.x0, bounds.y0);
    let pw = bounds.width().max(1.0) as u32;
    let ph = bounds.height().max(1.0) as u32;

    let mut bytes = Vec::with_capacity(pw as usize * ph as usize * 4);
    for py in 0..ph {
        for px in 0..pw {
            let p = Point::new(x0 + f64::from(px) + 0.5, y0 + f64::from(py) + 0.5);
            bytes.extend_from_slice(&gradient_at(g, p).to_premul());
        }
    }
    let pixmap = premul_bytes_to_pixmap(&bytes, pw, ph)?;

    ctx.push_clip_layer(&bezpath_to_cpu(&rect_path(rect)));
    ctx.set_transform(affine_to_cpu(Affine::translate((x0, y0))));
    ctx.set_paint(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    });
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(pw),
        f64::from(ph),
    ));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.pop_layer();
    Ok(())
}

/// Straight color of `g` at `p`, padding past either end.
pub(crate) fn gradient_at(g: &LinearGradient, p: Point) -> Rgba8 {
    let Some(first) = g.stops.first() else {
        return Rgba8::TRANSPARENT;
    };
    let axis = g.end - g.start;
    let len2 = axis.hypot2();
    let t = if len2 <= f64::EPSILON {
        0.0
    } else {
        ((p - g.start).dot(axis) / len2).clamp(0.0, 1.0) as f32
    };

    let mut prev = first;
    if t <= prev.offset {
        return prev.color;
    }
    for stop in &g.stops[1..] {
        if t <= stop.offset {
            let span = stop.offset - prev.offset;
            let u = if span <= f32::EPSILON {
                1.0
            } else {
                (t - prev.offset) / span
            };
            let lerp = |a: u8, b: u8| -> u8 {
                let (af, bf) = (f32::from(a), f32::from(b));
                (af + (bf - af) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8::rgba(
                lerp(prev.color.r, stop.color.r),
                lerp(prev.color.g, stop.color.g),
                lerp(prev.color.b, stop.color.b),
                lerp(prev.color.a, stop.color.a),
            );
        }
        prev = stop;
    }
    prev.color
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
