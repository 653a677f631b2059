//! Default option values

use crate::matrix::EcLevel;
use crate::types::Length;

pub const VALUE: &str = "This is a QR Code.";
pub const SIZE: Length = Length::new(100.0);
pub const COLOR: &str = "black";
pub const BACKGROUND_COLOR: &str = "white";
/// Logo edge length as a fraction of `size` when no logo size is given.
pub const LOGO_SIZE_RATIO: f64 = 0.2;
pub const LOGO_MARGIN: Length = Length::new(2.0);
pub const LOGO_BORDER_RADIUS: Length = Length::ZERO;
pub const PADDING: Length = Length::ZERO;
pub const ECL: EcLevel = EcLevel::M;

pub const CLIP_WRAPPER_ID: &str = "clip-wrapper";
pub const CLIP_LOGO_ID: &str = "clip-logo";
pub const LOGO_ASPECT: &str = "xMidYMid slice";
