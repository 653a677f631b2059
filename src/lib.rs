//! Render QR codes as compact SVG.
//!
//! The module matrix is compiled into one stroked path with a single segment per
//! horizontal run of dark modules, so a 25x25 code needs a few hundred path
//! commands instead of hundreds of rectangles. An optional logo is centered on
//! top, clipped to a rounded wrapper.
//!
//! ```
//! use qrpath::RenderConfig;
//!
//! let svg = qrpath::render_svg(
//!     &RenderConfig::new("https://example.com").size(200.0).padding(16.0),
//! )
//! .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! For repeated renders use [`QrCode`], which keeps the compiled path until
//! the value, size or error correction level changes.

pub mod config;
pub mod errors;
pub mod log;
pub mod matrix;
pub mod render;
pub mod state;
pub mod types;

pub use config::{ErrorHandler, RenderConfig};
pub use errors::{ConfigError, GenerationError};
pub use matrix::{EcLevel, Matrix, MatrixGenerator, QrMatrixGenerator};
pub use render::{LayoutGeometry, PathDescriptor, Scene, compile_path, compute_layout};
pub use state::{GenerationState, Generated, QrCode};
pub use types::{Color, Length};

/// Render `config` to an SVG document in one shot.
///
/// Fails only when the matrix cannot be generated and no `on_error` handler is
/// configured. With a handler, the failure is reported there and the SVG holds
/// the background (and logo) without a code.
pub fn render_svg(config: &RenderConfig) -> Result<String, GenerationError> {
    Ok(QrCode::new(config.clone())?.to_svg())
}
