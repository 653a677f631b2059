//! Scene graph for a rendered code.
//!
//! The renderer only ever needs five primitives: rect, path, image, group and
//! clip region. Each node knows how to write itself as SVG; the enum dispatches
//! statically via `enum_dispatch`.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use super::svg::{escape_attr, fmt_num, fmt_num_hi};
use crate::types::{Color, Length};

/// Common behavior for all scene nodes
#[enum_dispatch]
pub trait SceneElement {
    /// Append this node's SVG markup to `out`.
    fn write_svg(&self, out: &mut String);
}

/// Any node that can appear in a scene
#[enum_dispatch(SceneElement)]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Rect(RectNode),
    Path(PathNode),
    Image(ImageNode),
    Group(GroupNode),
}

fn clip_attr(clip: &Option<String>) -> String {
    match clip {
        Some(id) => format!(" clip-path=\"url(#{})\"", escape_attr(id)),
        None => String::new(),
    }
}

fn translate_attr(offset: DVec2) -> String {
    if offset == DVec2::ZERO {
        String::new()
    } else {
        format!(
            " transform=\"translate({} {})\"",
            fmt_num(offset.x),
            fmt_num(offset.y)
        )
    }
}

fn radius_attrs(radius: Length) -> String {
    if radius.is_positive() {
        let r = fmt_num(radius.raw());
        format!(" rx=\"{r}\" ry=\"{r}\"")
    } else {
        String::new()
    }
}

/// Filled rectangle anchored at the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RectNode {
    pub width: Length,
    pub height: Length,
    pub radius: Length,
    pub fill: Option<Color>,
    pub clip_path: Option<String>,
}

impl RectNode {
    pub fn square(size: Length) -> Self {
        Self {
            width: size,
            height: size,
            radius: Length::ZERO,
            fill: None,
            clip_path: None,
        }
    }

    pub fn with_radius(mut self, radius: Length) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn clipped_by(mut self, id: impl Into<String>) -> Self {
        self.clip_path = Some(id.into());
        self
    }
}

impl SceneElement for RectNode {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\"{}",
            fmt_num(self.width.raw()),
            fmt_num(self.height.raw()),
            radius_attrs(self.radius)
        ));
        if let Some(fill) = &self.fill {
            out.push_str(&format!(" fill=\"{}\"", escape_attr(&fill.to_string())));
        }
        out.push_str(&clip_attr(&self.clip_path));
        out.push_str("/>");
    }
}

/// Stroked path, translated by `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub origin: DVec2,
    pub data: String,
    pub stroke: Color,
    pub stroke_width: Length,
}

impl SceneElement for PathNode {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            "<path{} d=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            translate_attr(self.origin),
            self.data,
            escape_attr(&self.stroke.to_string()),
            fmt_num_hi(self.stroke_width.raw())
        ));
    }
}

/// External image scaled to cover its box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub width: Length,
    pub height: Length,
    pub href: String,
    pub preserve_aspect_ratio: &'static str,
    pub clip_path: Option<String>,
}

impl SceneElement for ImageNode {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            "<image width=\"{}\" height=\"{}\" preserveAspectRatio=\"{}\" href=\"{}\"{}/>",
            fmt_num(self.width.raw()),
            fmt_num(self.height.raw()),
            self.preserve_aspect_ratio,
            escape_attr(&self.href),
            clip_attr(&self.clip_path)
        ));
    }
}

/// Translated container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupNode {
    pub origin: DVec2,
    pub children: Vec<SceneNode>,
}

impl GroupNode {
    pub fn at(origin: DVec2) -> Self {
        Self {
            origin,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.children.push(node.into());
    }
}

impl SceneElement for GroupNode {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!("<g{}>", translate_attr(self.origin)));
        for child in &self.children {
            child.write_svg(out);
        }
        out.push_str("</g>");
    }
}

/// Named clip region. Lives in `<defs>`, referenced by id.
///
/// The shape is evaluated in the user space of the referencing element, so a
/// rect at the local origin follows whatever group translation applies there.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPathNode {
    pub id: String,
    pub shape: RectNode,
}

impl SceneElement for ClipPathNode {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!("<clipPath id=\"{}\">", escape_attr(&self.id)));
        self.shape.write_svg(out);
        out.push_str("</clipPath>");
    }
}

/// A complete picture: square canvas, clip definitions, and drawn nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Length,
    pub defs: Vec<ClipPathNode>,
    pub children: Vec<SceneNode>,
}

impl Scene {
    pub fn new(size: Length) -> Self {
        Self {
            size,
            defs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.children.push(node.into());
    }

    /// The stroked code path, if the scene has one.
    pub fn path(&self) -> Option<&PathNode> {
        self.children.iter().find_map(|node| match node {
            SceneNode::Path(p) => Some(p),
            _ => None,
        })
    }

    pub fn clip(&self, id: &str) -> Option<&ClipPathNode> {
        self.defs.iter().find(|c| c.id == id)
    }
}
