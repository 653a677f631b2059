//! Generation orchestration.
//!
//! A [`QrCode`] owns the current config snapshot and the matrix/path pair
//! derived from it. The pair is recomputed only when the memo key
//! `(value, size, ecl)` changes; layout is recomputed on every render since it
//! is a handful of additions.
//!
//! Failures follow the configured policy: with an `on_error` handler the error
//! is reported there and the code falls back to an empty state (background and
//! logo still render); without one the error is returned and the component is
//! left exactly as it was before the call.

use crate::config::RenderConfig;
use crate::errors::GenerationError;
use crate::matrix::{EcLevel, Matrix, MatrixGenerator, QrMatrixGenerator};
use crate::render::{
    LayoutGeometry, PathDescriptor, Scene, StrokedPath, compile_path, compose_scene,
    compute_layout,
};
use crate::types::Length;

/// A matrix and the path compiled from it. Always replaced as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub value: String,
    pub size: Length,
    pub ecl: EcLevel,
    pub cell_size: Length,
    pub matrix: Matrix,
    pub path: PathDescriptor,
}

impl Generated {
    fn matches(&self, config: &RenderConfig) -> bool {
        self.value == config.value && self.size == config.size && self.ecl == config.ecl
    }
}

/// Derived state of a component.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GenerationState {
    Ready(Generated),
    /// Generation failed and the failure was handled
    #[default]
    Empty,
}

impl GenerationState {
    pub fn generated(&self) -> Option<&Generated> {
        match self {
            GenerationState::Ready(g) => Some(g),
            GenerationState::Empty => None,
        }
    }
}

/// Generate the matrix for `config` and compile its path.
pub fn generate<G: MatrixGenerator + ?Sized>(
    config: &RenderConfig,
    generator: &G,
) -> Result<Generated, GenerationError> {
    let matrix = generator.generate(&config.value, config.ecl)?;
    let cell_size = config.size.per(matrix.width()).unwrap_or(Length::ZERO);
    let path = compile_path(&matrix, cell_size);

    Ok(Generated {
        value: config.value.clone(),
        size: config.size,
        ecl: config.ecl,
        cell_size,
        matrix,
        path,
    })
}

/// Apply the error policy to a generation result.
///
/// Handled failures become [`GenerationState::Empty`]; unhandled ones are
/// returned to the caller.
pub fn resolve(
    config: &RenderConfig,
    result: Result<Generated, GenerationError>,
) -> Result<GenerationState, GenerationError> {
    match result {
        Ok(generated) => Ok(GenerationState::Ready(generated)),
        Err(err) => match &config.on_error {
            Some(handler) => {
                crate::log::warn!(error = %err, "matrix generation failed, rendering without code");
                handler(&err);
                Ok(GenerationState::Empty)
            }
            None => Err(err),
        },
    }
}

/// A QR code component: config snapshot plus memoized matrix and path.
pub struct QrCode<G = QrMatrixGenerator> {
    config: RenderConfig,
    generator: G,
    state: GenerationState,
}

impl QrCode<QrMatrixGenerator> {
    /// Build a component using the bundled QR encoder.
    pub fn new(config: RenderConfig) -> Result<Self, GenerationError> {
        Self::with_generator(config, QrMatrixGenerator)
    }
}

impl<G: MatrixGenerator> QrCode<G> {
    /// Build a component with a custom matrix generator.
    pub fn with_generator(config: RenderConfig, generator: G) -> Result<Self, GenerationError> {
        let state = resolve(&config, generate(&config, &generator))?;
        crate::log::debug!(
            value = %config.value,
            size = config.size.raw(),
            "generated initial matrix"
        );
        Ok(Self {
            config,
            generator,
            state,
        })
    }

    /// Replace the config snapshot.
    ///
    /// Returns `Ok(true)` when the matrix was regenerated, `Ok(false)` when the
    /// memoized pair was kept. On an unhandled failure nothing changes.
    pub fn update(&mut self, config: RenderConfig) -> Result<bool, GenerationError> {
        let fresh = self
            .state
            .generated()
            .is_some_and(|generated| generated.matches(&config));

        if fresh {
            crate::log::debug!("memo hit, keeping matrix and path");
            self.config = config;
            return Ok(false);
        }

        crate::log::debug!(
            value = %config.value,
            size = config.size.raw(),
            ecl = %config.ecl,
            "regenerating matrix"
        );
        let state = resolve(&config, generate(&config, &self.generator))?;
        self.state = state;
        self.config = config;
        Ok(true)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn matrix(&self) -> Option<&Matrix> {
        self.state.generated().map(|g| &g.matrix)
    }

    pub fn path(&self) -> Option<&PathDescriptor> {
        self.state.generated().map(|g| &g.path)
    }

    pub fn cell_size(&self) -> Option<Length> {
        self.state.generated().map(|g| g.cell_size)
    }

    /// Geometry for the current config. Cheap; computed fresh every call.
    pub fn layout(&self) -> LayoutGeometry {
        compute_layout(&self.config.layout_input())
    }

    pub fn scene(&self) -> Scene {
        let layout = self.layout();
        let stroked = self.state.generated().map(|g| StrokedPath {
            path: &g.path,
            cell_size: g.cell_size,
        });
        compose_scene(&self.config, stroked, &layout)
    }

    pub fn to_svg(&self) -> String {
        self.scene().to_svg()
    }
}
