//! Host-document collaborator interface.
//!
//! The generator never owns a scene graph. It drives a [`SceneHost`] — the
//! surrounding document environment — through opaque [`NodeId`] handles, and
//! ownership of every created subtree passes to the host once the subtree is
//! appended to the page. The crate ships one reference implementation,
//! [`memory::MemoryDocument`], used by the test suite and the CLI.

pub mod memory;

use std::collections::BTreeMap;

use crate::foundation::core::{Edges, Point, Rgba, Size};
use crate::foundation::error::OnboarderResult;

/// Opaque handle to a node owned by the host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

/// Opaque handle to an imported component definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ComponentId(pub u32);

/// Primitive shape nodes the host can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Vector,
}

/// Stacking direction of an auto-layout container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LayoutDirection {
    Vertical,
    Horizontal,
}

/// Alignment of children along an auto-layout axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AxisAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Whether a container takes a fixed size along an axis or hugs its contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SizingMode {
    #[default]
    Fixed,
    Auto,
}

/// Auto-layout configuration applied to a container node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutoLayout {
    pub direction: LayoutDirection,
    pub main_align: AxisAlign,
    pub cross_align: AxisAlign,
    pub main_sizing: SizingMode,
    pub cross_sizing: SizingMode,
    pub item_spacing: f64,
}

impl AutoLayout {
    /// Vertical stack hugging its contents on both axes.
    pub fn vertical(item_spacing: f64) -> Self {
        Self {
            direction: LayoutDirection::Vertical,
            main_align: AxisAlign::Start,
            cross_align: AxisAlign::Start,
            main_sizing: SizingMode::Auto,
            cross_sizing: SizingMode::Auto,
            item_spacing,
        }
    }

    /// Horizontal row hugging its contents on both axes.
    pub fn horizontal(item_spacing: f64) -> Self {
        Self {
            direction: LayoutDirection::Horizontal,
            main_align: AxisAlign::Start,
            cross_align: AxisAlign::Start,
            main_sizing: SizingMode::Auto,
            cross_sizing: SizingMode::Auto,
            item_spacing,
        }
    }

    pub fn centered(mut self) -> Self {
        self.main_align = AxisAlign::Center;
        self.cross_align = AxisAlign::Center;
        self
    }

    pub fn main_align(mut self, align: AxisAlign) -> Self {
        self.main_align = align;
        self
    }

    pub fn cross_align(mut self, align: AxisAlign) -> Self {
        self.cross_align = align;
        self
    }

    pub fn fixed_main(mut self) -> Self {
        self.main_sizing = SizingMode::Fixed;
        self
    }

    pub fn fixed_cross(mut self) -> Self {
        self.cross_sizing = SizingMode::Fixed;
        self
    }
}

/// Solid stroke paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub weight: f64,
}

impl Stroke {
    pub fn hairline(color: Rgba) -> Self {
        Self { color, weight: 1.0 }
    }
}

/// Drop-shadow effect preset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    pub color: Rgba,
    pub offset_x: f64,
    pub offset_y: f64,
    pub radius: f64,
    pub spread: f64,
}

/// A typeface reference in `family` + `style` form, as the host registers it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontRef {
    pub family: String,
    pub style: String,
}

impl FontRef {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    /// Identifier used by the font-load cache.
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.family, self.style)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextCase {
    #[default]
    Original,
    Upper,
}

/// Kind of a declared component property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PropertyKind {
    Text,
    Variant,
}

/// One declared property slot on a component definition.
///
/// Property names in the definition map may carry an opaque uniqueness suffix
/// after `#` (e.g. `headline#123:456`); matching against them is the
/// populator's job, not the host's.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyDef {
    pub kind: PropertyKind,
    pub variant_options: Vec<String>,
}

impl PropertyDef {
    pub fn text() -> Self {
        Self {
            kind: PropertyKind::Text,
            variant_options: Vec::new(),
        }
    }

    pub fn variant(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind: PropertyKind::Variant,
            variant_options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Notification sent back to the surrounding UI panel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UiEvent {
    GenerationComplete { step_count: usize },
}

/// The document environment the generator runs against.
///
/// Node creation and styling are infallible, mirroring the host primitives;
/// the operations that can genuinely fail (component import, property
/// application, typeface registration, page loading) return results. Setters
/// on a handle of the wrong kind are ignored by the host.
pub trait SceneHost {
    // Node creation and tree shape.
    fn create_frame(&mut self) -> NodeId;
    fn create_text(&mut self) -> NodeId;
    fn create_shape(&mut self, shape: ShapeKind) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    // Geometry and styling.
    fn set_name(&mut self, node: NodeId, name: &str);
    fn resize(&mut self, node: NodeId, size: Size);
    fn set_position(&mut self, node: NodeId, position: Point);
    fn set_fill(&mut self, node: NodeId, fill: Option<Rgba>);
    fn set_stroke(&mut self, node: NodeId, stroke: Option<Stroke>);
    fn set_corner_radius(&mut self, node: NodeId, radius: f64);
    fn set_padding(&mut self, node: NodeId, padding: Edges);
    fn set_auto_layout(&mut self, node: NodeId, layout: AutoLayout);
    fn set_shadow(&mut self, node: NodeId, shadow: Option<ShadowSpec>);
    fn set_visible(&mut self, node: NodeId, visible: bool);

    // Text.
    fn set_characters(&mut self, node: NodeId, characters: &str);
    fn set_font(&mut self, node: NodeId, font: &FontRef);
    fn set_font_size(&mut self, node: NodeId, size: f64);
    fn set_text_color(&mut self, node: NodeId, color: Rgba);
    fn set_text_align(&mut self, node: NodeId, align: TextAlign);
    fn set_text_case(&mut self, node: NodeId, case: TextCase);
    /// Apply `font` to the byte range `start..end` of the node's characters,
    /// layering a second font run over the base font.
    fn set_range_font(&mut self, node: NodeId, start: usize, end: usize, font: &FontRef);

    // Tree reads.
    fn node_name(&self, node: NodeId) -> String;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn is_instance(&self, node: NodeId) -> bool;

    // Component library.
    fn import_component(&mut self, key: &str) -> OnboarderResult<Option<ComponentId>>;
    fn instantiate(&mut self, component: ComponentId) -> OnboarderResult<NodeId>;
    fn property_definitions(&self, instance: NodeId) -> BTreeMap<String, PropertyDef>;
    fn set_properties(
        &mut self,
        instance: NodeId,
        values: &BTreeMap<String, String>,
    ) -> OnboarderResult<()>;

    // Environment.
    fn load_font(&mut self, font: &FontRef) -> OnboarderResult<()>;
    fn load_all_pages(&mut self) -> OnboarderResult<()>;
    fn append_to_page(&mut self, node: NodeId);
    fn notify(&mut self, message: &str, error: bool);
    fn select(&mut self, nodes: &[NodeId]);
    fn zoom_into_view(&mut self, nodes: &[NodeId]);
    fn post_event(&mut self, event: UiEvent);
    fn close_session(&mut self);
}

/// Depth-first preorder walk of `root`'s subtree, `root` included.
pub fn walk_subtree(host: &dyn SceneHost, root: NodeId, visit: &mut dyn FnMut(NodeId)) {
    visit(root);
    for child in host.children(root) {
        walk_subtree(host, child, visit);
    }
}

/// First descendant of `root` (excluding `root`) whose name satisfies `pred`,
/// in document order.
pub fn find_descendant(
    host: &dyn SceneHost,
    root: NodeId,
    pred: &dyn Fn(&str) -> bool,
) -> Option<NodeId> {
    for child in host.children(root) {
        if pred(&host.node_name(child)) {
            return Some(child);
        }
        if let Some(found) = find_descendant(host, child, pred) {
            return Some(found);
        }
    }
    None
}

/// All descendants of `root` (excluding `root`) whose names satisfy `pred`,
/// in document order.
pub fn find_descendants(
    host: &dyn SceneHost,
    root: NodeId,
    pred: &dyn Fn(&str) -> bool,
) -> Vec<NodeId> {
    let mut found = Vec::new();
    walk_subtree(host, root, &mut |node| {
        if node != root && pred(&host.node_name(node)) {
            found.push(node);
        }
    });
    found
}
