use crate::text::fonts::{FontSpec, TextMeasure};

/// One laid-out line: text centered on `x` with its baseline (or middle) at `y`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PositionedLine {
    /// Line text, trimmed.
    pub text: String,
    /// Horizontal anchor.
    pub x: f64,
    /// Vertical anchor.
    pub y: f64,
}

/// Result of a positioned wrap.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBlock {
    /// Lines in drawing order.
    pub lines: Vec<PositionedLine>,
    /// The y coordinate just past the last line, for stacking the next block.
    pub end_y: f64,
}

/// Greedy word wrap on ASCII spaces.
///
/// A word is appended while `line + word + " "` measures at most `max_width`; otherwise the
/// current line is committed (when non-empty) and the word starts a new one. Words wider than
/// `max_width` get a line of their own. Empty input yields one empty line.
pub fn wrap_lines(
    text: &str,
    max_width: f64,
    font: &FontSpec,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate = format!("{line}{word} ");
        if measure.measure(&candidate, font) > max_width && !line.is_empty() {
            lines.push(line.trim().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim().to_string());
    lines
}

/// Number of lines [`wrap_lines`] would produce; empty text counts as zero.
pub fn count_wrapped_lines(
    text: &str,
    max_width: f64,
    font: &FontSpec,
    measure: &mut dyn TextMeasure,
) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    wrap_lines(text, max_width, font, measure).len()
}

/// Wrap `text` and center the block vertically on `center_y`.
///
/// The first line sits at `center_y - (n - 1) * line_height / 2`.
pub fn wrap_centered(
    text: &str,
    center_x: f64,
    center_y: f64,
    max_width: f64,
    line_height: f64,
    font: &FontSpec,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let lines = wrap_lines(text, max_width, font, measure);
    let n = lines.len() as f64;
    let start_y = center_y - (n - 1.0) * line_height / 2.0;
    position(lines, center_x, start_y, line_height)
}

/// Wrap `text` downward from `start_y`.
///
/// `end_y` is `start_y + n * line_height`.
pub fn wrap_from_top(
    text: &str,
    center_x: f64,
    start_y: f64,
    max_width: f64,
    line_height: f64,
    font: &FontSpec,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let lines = wrap_lines(text, max_width, font, measure);
    position(lines, center_x, start_y, line_height)
}

fn position(lines: Vec<String>, x: f64, start_y: f64, line_height: f64) -> TextBlock {
    let n = lines.len();
    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| PositionedLine {
            text,
            x,
            y: start_y + i as f64 * line_height,
        })
        .collect();
    TextBlock {
        lines,
        end_y: start_y + n as f64 * line_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
