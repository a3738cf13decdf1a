//! In-memory reference implementation of [`SceneHost`].
//!
//! Backs the test suite and the CLI's `generate --out` tree dump. Components
//! are registered up front with their property definitions and an optional
//! template subtree; instantiation deep-clones the template.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use crate::foundation::core::{Edges, Point, Rgba, Size};
use crate::foundation::error::{OnboarderError, OnboarderResult};
use crate::host::{
    AutoLayout, ComponentId, FontRef, NodeId, PropertyDef, SceneHost, ShadowSpec, ShapeKind,
    Stroke, TextAlign, TextCase, UiEvent,
};

#[derive(Clone, Debug, serde::Serialize)]
pub enum MemoryNodeKind {
    Frame,
    Text,
    Shape(ShapeKind),
    Instance(ComponentId),
}

/// One font run layered over a text node's base font.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FontRun {
    pub start: usize,
    pub end: usize,
    pub font: FontRef,
}

#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct TextContent {
    pub characters: String,
    pub font: Option<FontRef>,
    pub font_size: f64,
    pub color: Option<Rgba>,
    pub align: TextAlign,
    pub case: TextCase,
    pub runs: Vec<FontRun>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct MemoryNode {
    pub kind: MemoryNodeKind,
    pub name: String,
    pub visible: bool,
    pub position: Point,
    pub size: Size,
    pub fill: Option<Rgba>,
    pub stroke: Option<Stroke>,
    pub corner_radius: f64,
    pub padding: Edges,
    pub layout: Option<AutoLayout>,
    pub shadow: Option<ShadowSpec>,
    pub text: Option<TextContent>,
    /// Component properties applied through `set_properties`.
    pub properties: BTreeMap<String, String>,
    pub children: Vec<NodeId>,
}

impl MemoryNode {
    fn new(kind: MemoryNodeKind) -> Self {
        let text = matches!(kind, MemoryNodeKind::Text).then(TextContent::default);
        Self {
            kind,
            name: String::new(),
            visible: true,
            position: Point::ZERO,
            size: Size::ZERO,
            fill: None,
            stroke: None,
            corner_radius: 0.0,
            padding: Edges::default(),
            layout: None,
            shadow: None,
            text,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct ComponentEntry {
    name: String,
    defs: BTreeMap<String, PropertyDef>,
    template: Option<NodeId>,
}

/// In-memory scene document.
#[derive(Default)]
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    components: Vec<ComponentEntry>,
    component_keys: BTreeMap<String, ComponentId>,
    page: Vec<NodeId>,
    loaded_fonts: BTreeSet<String>,
    pages_loaded: bool,
    notifications: Vec<(String, bool)>,
    events: Vec<UiEvent>,
    selection: Vec<NodeId>,
    framed: Vec<NodeId>,
    closed: bool,
    fail_property_sets: bool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MemoryNode {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, node: MemoryNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Register a component under a catalog key. `template`, when given, is a
    /// previously built subtree that instantiation deep-clones.
    pub fn register_component(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        defs: BTreeMap<String, PropertyDef>,
        template: Option<NodeId>,
    ) -> ComponentId {
        let id = ComponentId(self.components.len() as u32);
        self.components.push(ComponentEntry {
            name: name.into(),
            defs,
            template,
        });
        self.component_keys.insert(key.into(), id);
        id
    }

    /// Make every subsequent `set_properties` call fail, for exercising the
    /// diagnostics-only population tier.
    pub fn fail_property_sets(&mut self, fail: bool) {
        self.fail_property_sets = fail;
    }

    pub fn page(&self) -> &[NodeId] {
        &self.page
    }

    pub fn notifications(&self) -> &[(String, bool)] {
        &self.notifications
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn framed(&self) -> &[NodeId] {
        &self.framed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn pages_loaded(&self) -> bool {
        self.pages_loaded
    }

    pub fn font_is_loaded(&self, font: &FontRef) -> bool {
        self.loaded_fonts.contains(&font.cache_key())
    }

    /// Applied component properties of an instance node.
    pub fn applied_properties(&self, instance: NodeId) -> &BTreeMap<String, String> {
        &self.node(instance).properties
    }

    /// Text characters of a node, empty for non-text nodes.
    pub fn characters(&self, node: NodeId) -> &str {
        self.node(node)
            .text
            .as_ref()
            .map(|t| t.characters.as_str())
            .unwrap_or("")
    }

    fn clone_subtree(&mut self, source: NodeId) -> NodeId {
        let mut cloned = self.node(source).clone();
        let children = std::mem::take(&mut cloned.children);
        let id = self.alloc(cloned);
        for child in children {
            let child_clone = self.clone_subtree(child);
            self.node_mut(id).children.push(child_clone);
        }
        id
    }

    /// Serialize a node subtree with children inlined, for diffable dumps.
    pub fn node_tree(&self, id: NodeId) -> serde_json::Value {
        let node = self.node(id);
        let mut value = serde_json::to_value(node).expect("memory node serializes");
        value["children"] = serde_json::Value::Array(
            node.children.iter().map(|c| self.node_tree(*c)).collect(),
        );
        value
    }

    /// Serialize every page root.
    pub fn page_tree(&self) -> serde_json::Value {
        json!({
            "page": self.page.iter().map(|n| self.node_tree(*n)).collect::<Vec<_>>(),
        })
    }
}

impl SceneHost for MemoryDocument {
    fn create_frame(&mut self) -> NodeId {
        self.alloc(MemoryNode::new(MemoryNodeKind::Frame))
    }

    fn create_text(&mut self) -> NodeId {
        self.alloc(MemoryNode::new(MemoryNodeKind::Text))
    }

    fn create_shape(&mut self, shape: ShapeKind) -> NodeId {
        self.alloc(MemoryNode::new(MemoryNodeKind::Shape(shape)))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.push(child);
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        self.node_mut(node).name = name.to_owned();
    }

    fn resize(&mut self, node: NodeId, size: Size) {
        self.node_mut(node).size = size;
    }

    fn set_position(&mut self, node: NodeId, position: Point) {
        self.node_mut(node).position = position;
    }

    fn set_fill(&mut self, node: NodeId, fill: Option<Rgba>) {
        self.node_mut(node).fill = fill;
    }

    fn set_stroke(&mut self, node: NodeId, stroke: Option<Stroke>) {
        self.node_mut(node).stroke = stroke;
    }

    fn set_corner_radius(&mut self, node: NodeId, radius: f64) {
        self.node_mut(node).corner_radius = radius;
    }

    fn set_padding(&mut self, node: NodeId, padding: Edges) {
        self.node_mut(node).padding = padding;
    }

    fn set_auto_layout(&mut self, node: NodeId, layout: AutoLayout) {
        self.node_mut(node).layout = Some(layout);
    }

    fn set_shadow(&mut self, node: NodeId, shadow: Option<ShadowSpec>) {
        self.node_mut(node).shadow = shadow;
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.node_mut(node).visible = visible;
    }

    fn set_characters(&mut self, node: NodeId, characters: &str) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.characters = characters.to_owned();
        }
    }

    fn set_font(&mut self, node: NodeId, font: &FontRef) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.font = Some(font.clone());
        }
    }

    fn set_font_size(&mut self, node: NodeId, size: f64) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.font_size = size;
        }
    }

    fn set_text_color(&mut self, node: NodeId, color: Rgba) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.color = Some(color);
        }
    }

    fn set_text_align(&mut self, node: NodeId, align: TextAlign) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.align = align;
        }
    }

    fn set_text_case(&mut self, node: NodeId, case: TextCase) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.case = case;
        }
    }

    fn set_range_font(&mut self, node: NodeId, start: usize, end: usize, font: &FontRef) {
        if let Some(text) = self.node_mut(node).text.as_mut() {
            text.runs.push(FontRun {
                start,
                end,
                font: font.clone(),
            });
        }
    }

    fn node_name(&self, node: NodeId) -> String {
        self.node(node).name.clone()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    fn is_instance(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, MemoryNodeKind::Instance(_))
    }

    fn import_component(&mut self, key: &str) -> OnboarderResult<Option<ComponentId>> {
        Ok(self.component_keys.get(key).copied())
    }

    fn instantiate(&mut self, component: ComponentId) -> OnboarderResult<NodeId> {
        let entry = self
            .components
            .get(component.0 as usize)
            .cloned()
            .ok_or_else(|| OnboarderError::host(format!("unknown component {component:?}")))?;
        let id = match entry.template {
            Some(template) => self.clone_subtree(template),
            None => self.alloc(MemoryNode::new(MemoryNodeKind::Frame)),
        };
        let node = self.node_mut(id);
        node.kind = MemoryNodeKind::Instance(component);
        node.name = entry.name;
        Ok(id)
    }

    fn property_definitions(&self, instance: NodeId) -> BTreeMap<String, PropertyDef> {
        match self.node(instance).kind {
            MemoryNodeKind::Instance(component) => self.components[component.0 as usize]
                .defs
                .clone(),
            _ => BTreeMap::new(),
        }
    }

    fn set_properties(
        &mut self,
        instance: NodeId,
        values: &BTreeMap<String, String>,
    ) -> OnboarderResult<()> {
        if self.fail_property_sets {
            return Err(OnboarderError::host("property set rejected"));
        }
        if !self.is_instance(instance) {
            return Err(OnboarderError::host("set_properties on a non-instance node"));
        }
        self.node_mut(instance)
            .properties
            .extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn load_font(&mut self, font: &FontRef) -> OnboarderResult<()> {
        self.loaded_fonts.insert(font.cache_key());
        Ok(())
    }

    fn load_all_pages(&mut self) -> OnboarderResult<()> {
        self.pages_loaded = true;
        Ok(())
    }

    fn append_to_page(&mut self, node: NodeId) {
        self.page.push(node);
    }

    fn notify(&mut self, message: &str, error: bool) {
        self.notifications.push((message.to_owned(), error));
    }

    fn select(&mut self, nodes: &[NodeId]) {
        self.selection = nodes.to_vec();
    }

    fn zoom_into_view(&mut self, nodes: &[NodeId]) {
        self.framed = nodes.to_vec();
    }

    fn post_event(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    fn close_session(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_clones_template_subtree() {
        let mut doc = MemoryDocument::new();
        let template = doc.create_frame();
        let label = doc.create_text();
        doc.set_name(label, "inputLabel");
        doc.set_characters(label, "placeholder");
        doc.append_child(template, label);

        let comp = doc.register_component("1-2", "card", BTreeMap::new(), Some(template));
        let instance = doc.instantiate(comp).unwrap();

        assert!(doc.is_instance(instance));
        let children = doc.children(instance);
        assert_eq!(children.len(), 1);
        assert_ne!(children[0], label);
        assert_eq!(doc.node_name(children[0]), "inputLabel");

        // Mutating the clone leaves the template untouched.
        doc.set_characters(children[0], "changed");
        assert_eq!(doc.characters(label), "placeholder");
    }

    #[test]
    fn set_properties_requires_instance() {
        let mut doc = MemoryDocument::new();
        let frame = doc.create_frame();
        let values = BTreeMap::from([("headline".to_owned(), "x".to_owned())]);
        assert!(doc.set_properties(frame, &values).is_err());
    }

    #[test]
    fn page_tree_inlines_children() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_frame();
        let child = doc.create_frame();
        doc.set_name(root, "root");
        doc.set_name(child, "child");
        doc.append_child(root, child);
        doc.append_to_page(root);

        let tree = doc.page_tree();
        assert_eq!(tree["page"][0]["name"], "root");
        assert_eq!(tree["page"][0]["children"][0]["name"], "child");
    }
}
