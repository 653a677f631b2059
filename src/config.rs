//! Render configuration.
//!
//! A `RenderConfig` is an immutable snapshot of everything the caller can set.
//! Handing a new snapshot to [`QrCode::update`](crate::QrCode::update) decides
//! what has to be recomputed.

use std::fmt;
use std::sync::Arc;

use crate::errors::{ConfigError, GenerationError};
use crate::matrix::EcLevel;
use crate::render::defaults;
use crate::render::layout::LayoutInput;
use crate::types::{Color, Length};

/// Receives generation failures instead of letting them propagate.
pub type ErrorHandler = Arc<dyn Fn(&GenerationError) + Send + Sync>;

/// Everything a caller can configure for one render.
#[derive(Clone)]
pub struct RenderConfig {
    /// Text to encode
    pub value: String,
    /// Edge length of the code area, excluding padding
    pub size: Length,
    /// Module color
    pub color: Color,
    pub background_color: Color,
    /// Image reference (URL or data URI) drawn over the center
    pub logo: Option<String>,
    /// Logo edge length; `None` means 20% of `size`
    pub logo_size: Option<Length>,
    /// Fill behind the logo; `None` means `background_color`
    pub logo_background_color: Option<Color>,
    /// Gap between the logo and its wrapper
    pub logo_margin: Length,
    pub logo_border_radius: Length,
    pub ecl: EcLevel,
    /// Extra space around the code, split evenly on both sides
    pub padding: Length,
    /// Prepended to the clip path ids, so several codes can share one document
    pub clip_id_prefix: String,
    /// Generation failure callback; without it failures propagate
    pub on_error: Option<ErrorHandler>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            value: defaults::VALUE.to_string(),
            size: defaults::SIZE,
            color: Color::from(defaults::COLOR),
            background_color: Color::from(defaults::BACKGROUND_COLOR),
            logo: None,
            logo_size: None,
            logo_background_color: None,
            logo_margin: defaults::LOGO_MARGIN,
            logo_border_radius: defaults::LOGO_BORDER_RADIUS,
            ecl: defaults::ECL,
            padding: defaults::PADDING,
            clip_id_prefix: String::new(),
            on_error: None,
        }
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("value", &self.value)
            .field("size", &self.size)
            .field("color", &self.color)
            .field("background_color", &self.background_color)
            .field("logo", &self.logo)
            .field("logo_size", &self.logo_size)
            .field("logo_background_color", &self.logo_background_color)
            .field("logo_margin", &self.logo_margin)
            .field("logo_border_radius", &self.logo_border_radius)
            .field("ecl", &self.ecl)
            .field("padding", &self.padding)
            .field("clip_id_prefix", &self.clip_id_prefix)
            .field("on_error", &self.on_error.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

impl RenderConfig {
    /// Default configuration encoding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn size(mut self, size: impl Into<Length>) -> Self {
        self.size = size.into();
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn logo(mut self, href: impl Into<String>) -> Self {
        self.logo = Some(href.into());
        self
    }

    pub fn logo_size(mut self, size: impl Into<Length>) -> Self {
        self.logo_size = Some(size.into());
        self
    }

    pub fn logo_background_color(mut self, color: impl Into<Color>) -> Self {
        self.logo_background_color = Some(color.into());
        self
    }

    pub fn logo_margin(mut self, margin: impl Into<Length>) -> Self {
        self.logo_margin = margin.into();
        self
    }

    pub fn logo_border_radius(mut self, radius: impl Into<Length>) -> Self {
        self.logo_border_radius = radius.into();
        self
    }

    pub fn ecl(mut self, ecl: EcLevel) -> Self {
        self.ecl = ecl;
        self
    }

    pub fn padding(mut self, padding: impl Into<Length>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn clip_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.clip_id_prefix = prefix.into();
        self
    }

    /// Id of the clip region around the logo wrapper.
    pub fn clip_wrapper_id(&self) -> String {
        format!("{}{}", self.clip_id_prefix, defaults::CLIP_WRAPPER_ID)
    }

    /// Id of the clip region around the logo image.
    pub fn clip_logo_id(&self) -> String {
        format!("{}{}", self.clip_id_prefix, defaults::CLIP_LOGO_ID)
    }

    pub fn on_error(mut self, handler: impl Fn(&GenerationError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(handler));
        self
    }

    pub fn resolved_logo_size(&self) -> Length {
        self.logo_size.unwrap_or(self.size * defaults::LOGO_SIZE_RATIO)
    }

    pub fn resolved_logo_background(&self) -> &Color {
        self.logo_background_color
            .as_ref()
            .unwrap_or(&self.background_color)
    }

    /// The subset of options the layout depends on.
    pub fn layout_input(&self) -> LayoutInput {
        LayoutInput {
            size: self.size,
            padding: self.padding,
            logo_size: self.resolved_logo_size(),
            logo_margin: self.logo_margin,
            logo_border_radius: self.logo_border_radius,
        }
    }

    /// Check numeric options for values that would produce a broken picture.
    ///
    /// Rendering never calls this; it is for callers taking untrusted input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Length::try_positive(self.size.raw()).map_err(|e| ConfigError::new("size", e))?;
        Length::try_non_negative(self.padding.raw()).map_err(|e| ConfigError::new("padding", e))?;
        Length::try_non_negative(self.logo_margin.raw())
            .map_err(|e| ConfigError::new("logo_margin", e))?;
        Length::try_non_negative(self.logo_border_radius.raw())
            .map_err(|e| ConfigError::new("logo_border_radius", e))?;
        if let Some(logo_size) = self.logo_size {
            Length::try_non_negative(logo_size.raw())
                .map_err(|e| ConfigError::new("logo_size", e))?;
        }
        Ok(())
    }
}
