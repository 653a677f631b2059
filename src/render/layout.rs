//! Canvas and logo placement.
//!
//! Pure arithmetic over five numbers: render size `S`, padding `P`, logo size
//! `L`, logo margin `M` and logo corner radius `R`.
//!
//! ```text
//! canvas          = S + P                       (square)
//! path origin     = (P/2, P/2)
//! wrapper size    = L + 2M
//! wrapper radius  = R + M if R > 0, else R
//! logo position   = S/2 - L/2 - M + P/2         (both axes)
//! inner logo rect = offset (M, M) inside the wrapper, L x L, radius R
//! ```
//!
//! Nothing is clamped: a logo bigger than the code simply overflows it.

use glam::{DVec2, dvec2};

use crate::types::Length;

/// The five inputs the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub size: Length,
    pub padding: Length,
    pub logo_size: Length,
    pub logo_margin: Length,
    pub logo_border_radius: Length,
}

/// Axis-aligned square with rounded corners.
///
/// `origin` is relative to whatever contains the rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub origin: DVec2,
    pub size: Length,
    pub radius: Length,
}

/// Derived geometry for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    /// Width and height of the canvas and its background rect.
    pub canvas_size: Length,
    /// Translation applied to the compiled path.
    pub path_origin: DVec2,
    /// Logo wrapper, positioned in canvas space.
    pub logo_wrapper: RoundedRect,
    /// Logo image rect, positioned inside the wrapper.
    pub logo: RoundedRect,
}

impl LayoutGeometry {
    /// Top-left corner of the logo wrapper in canvas space.
    pub fn logo_position(&self) -> DVec2 {
        self.logo_wrapper.origin
    }

    /// Top-left corner of the logo image in canvas space.
    pub fn logo_absolute_origin(&self) -> DVec2 {
        self.logo_wrapper.origin + self.logo.origin
    }
}

/// Compute the layout. Deterministic: same input, same output.
pub fn compute_layout(input: &LayoutInput) -> LayoutGeometry {
    let LayoutInput {
        size,
        padding,
        logo_size,
        logo_margin,
        logo_border_radius,
    } = *input;

    let canvas_size = size + padding;
    let half_pad = padding.raw() / 2.0;

    let wrapper_size = logo_size + logo_margin * 2.0;
    let wrapper_radius = if logo_border_radius.is_positive() {
        logo_border_radius + logo_margin
    } else {
        logo_border_radius
    };

    let logo_pos = size.raw() / 2.0 - logo_size.raw() / 2.0 - logo_margin.raw() + half_pad;

    LayoutGeometry {
        canvas_size,
        path_origin: DVec2::splat(half_pad),
        logo_wrapper: RoundedRect {
            origin: DVec2::splat(logo_pos),
            size: wrapper_size,
            radius: wrapper_radius,
        },
        logo: RoundedRect {
            origin: dvec2(logo_margin.raw(), logo_margin.raw()),
            size: logo_size,
            radius: logo_border_radius,
        },
    }
}
