//! Rendering for QR codes
//!
//! This module is organized into submodules:
//! - `defaults`: Default option values
//! - `path`: Matrix to stroke-path compiler
//! - `layout`: Canvas, padding and logo geometry
//! - `scene`: Scene graph nodes
//! - `svg`: SVG serialization

pub mod defaults;
pub mod layout;
pub mod path;
pub mod scene;
pub mod svg;

pub use layout::{LayoutGeometry, LayoutInput, RoundedRect, compute_layout};
pub use path::{PathBuilder, PathCommand, PathDescriptor, Segment, compile_path, row_runs};
pub use scene::{
    ClipPathNode, GroupNode, ImageNode, PathNode, RectNode, Scene, SceneElement, SceneNode,
};

use crate::config::RenderConfig;
use crate::types::Length;

/// A compiled path together with the cell size it was compiled for.
#[derive(Debug, Clone, Copy)]
pub struct StrokedPath<'a> {
    pub path: &'a PathDescriptor,
    pub cell_size: Length,
}

/// Compose the scene for one render pass.
///
/// Layering, back to front: background over the full canvas, the code path
/// offset by half the padding, then the logo (wrapper fill and image, each
/// clipped to its rounded rect). `path` is `None` when generation failed and
/// the failure was handled; the code is then simply absent.
pub fn compose_scene(
    config: &RenderConfig,
    path: Option<StrokedPath<'_>>,
    layout: &LayoutGeometry,
) -> Scene {
    let mut scene = Scene::new(layout.canvas_size);

    scene.push(RectNode::square(layout.canvas_size).with_fill(config.background_color.clone()));

    if let Some(StrokedPath { path, cell_size }) = path {
        if !path.is_empty() && cell_size.is_positive() {
            scene.push(PathNode {
                origin: layout.path_origin,
                data: path.to_path_data(),
                stroke: config.color.clone(),
                stroke_width: cell_size,
            });
        }
    }

    if let Some(href) = &config.logo {
        let wrapper = layout.logo_wrapper;
        let logo = layout.logo;
        let wrapper_clip = config.clip_wrapper_id();
        let logo_clip = config.clip_logo_id();

        scene.defs.push(ClipPathNode {
            id: wrapper_clip.clone(),
            shape: RectNode::square(wrapper.size).with_radius(wrapper.radius),
        });
        scene.defs.push(ClipPathNode {
            id: logo_clip.clone(),
            shape: RectNode::square(logo.size).with_radius(logo.radius),
        });

        let mut group = GroupNode::at(wrapper.origin);
        group.push(
            RectNode::square(wrapper.size)
                .with_fill(config.resolved_logo_background().clone())
                .clipped_by(wrapper_clip),
        );

        let mut inner = GroupNode::at(logo.origin);
        inner.push(ImageNode {
            width: logo.size,
            height: logo.size,
            href: href.clone(),
            preserve_aspect_ratio: defaults::LOGO_ASPECT,
            clip_path: Some(logo_clip),
        });
        group.push(inner);

        scene.push(group);
    }

    scene
}
