//! SVG generation

use super::scene::{Scene, SceneElement};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl Scene {
    /// Serialize the scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let size = fmt_num(self.size.raw());
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">"
        ));

        if !self.defs.is_empty() {
            out.push_str("<defs>");
            for clip in &self.defs {
                clip.write_svg(&mut out);
            }
            out.push_str("</defs>");
        }

        for node in &self.children {
            node.write_svg(&mut out);
        }

        out.push_str("</svg>");
        out
    }
}

/// Escape a string for use inside a double-quoted attribute.
pub(crate) fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with 10 significant figures, trailing zeros trimmed.
///
/// Used for path coordinates and stroke widths, which accumulate one cell at
/// a time and must stay aligned across large canvases.
pub(crate) fn fmt_num_hi(value: f64) -> String {
    fmt_num_precision(value, 10)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        // also folds -0.0 into "0"
        return if value.is_finite() {
            "0".to_string()
        } else {
            value.to_string()
        };
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
