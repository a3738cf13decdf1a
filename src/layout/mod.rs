//! Layout construction: the builder trait, the type dispatch registry, and
//! the error subtree produced when a builder fails.
//!
//! [`LayoutRegistry::create_layout`] never fails. A missing builder degrades
//! to the full-screen builder (renamed to flag the fallback); a builder error
//! degrades to a visible error frame carrying the step name, the requested
//! layout type, and the failure message, so the rest of the batch continues.

pub mod full_screen;
pub mod library;
pub mod modal;
pub mod split_screen;
pub mod tooltip;

use std::collections::BTreeMap;

use crate::context::GenContext;
use crate::flow::model::{LayoutType, OnboardingStep};
use crate::foundation::core::{Edges, Rgba, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost, TextAlign};

/// One procedural layout construction strategy.
pub trait LayoutBuilder {
    fn name(&self) -> &'static str;

    fn build(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> OnboarderResult<NodeId>;
}

/// Dispatch table from layout type to builder.
pub struct LayoutRegistry {
    builders: BTreeMap<LayoutType, Box<dyn LayoutBuilder>>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(LayoutType::FullScreen, Box::new(full_screen::FullScreenLayout));
        registry.register(LayoutType::ModalLayout, Box::new(modal::ModalLayout));
        // modal_form is the modal builder with the form arrangement driven by
        // the step's own modalType / inputFields.
        registry.register(LayoutType::ModalForm, Box::new(modal::ModalLayout));
        registry.register(LayoutType::SplitScreen, Box::new(split_screen::SplitScreenLayout));
        registry.register(LayoutType::TooltipOverlay, Box::new(tooltip::TooltipLayout));
        registry
    }
}

impl LayoutRegistry {
    pub fn empty() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, layout: LayoutType, builder: Box<dyn LayoutBuilder>) {
        self.builders.insert(layout, builder);
    }

    pub fn available(&self) -> Vec<LayoutType> {
        self.builders.keys().copied().collect()
    }

    /// Build the layout subtree for `step`. Never fails: missing builders
    /// fall back, failing builders produce the error subtree.
    pub fn create_layout(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> NodeId {
        match self.builders.get(&step.layout_type) {
            Some(builder) => match builder.build(host, ctx, step) {
                Ok(node) => node,
                Err(err) => {
                    tracing::warn!(
                        layout = step.layout_type.as_str(),
                        step = %step.step_name,
                        %err,
                        "layout builder failed"
                    );
                    error_layout(host, ctx, step, &err.to_string())
                }
            },
            None => self.fallback_layout(host, ctx, step),
        }
    }

    fn fallback_layout(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> NodeId {
        tracing::warn!(
            layout = step.layout_type.as_str(),
            "no builder registered, using fallback"
        );
        match self.builders.get(&LayoutType::FullScreen) {
            Some(fallback) => match fallback.build(host, ctx, step) {
                Ok(node) => {
                    host.set_name(node, &format!("{} (Fallback Layout)", step.step_name));
                    node
                }
                Err(err) => error_layout(host, ctx, step, &err.to_string()),
            },
            None => error_layout(host, ctx, step, "No fallback layout available"),
        }
    }
}

/// Fixed-size error frame shown in place of a failed layout.
pub fn error_layout(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
    message: &str,
) -> NodeId {
    use crate::components::text::{TextOptions, create_text};

    let tokens = ctx.tokens;
    let frame = host.create_frame();
    host.set_name(frame, &format!("Error: {}", step.step_name));
    host.set_auto_layout(
        frame,
        AutoLayout::vertical(tokens.spacing.md)
            .centered()
            .fixed_main()
            .fixed_cross(),
    );
    host.resize(frame, Size::new(400.0, 300.0));
    host.set_padding(frame, Edges::all(tokens.spacing.xl));
    host.set_fill(frame, Some(Rgba::opaque(1.0, 0.9, 0.9)));

    // Text is best-effort here; a host that cannot even load the fallback
    // font still gets the bare frame.
    let title_opts = TextOptions::body()
        .size(tokens.font_sizes.subtitle)
        .font(tokens.fonts.bold.clone())
        .color(Rgba::opaque(0.8, 0.2, 0.2))
        .align(TextAlign::Center);
    if let Ok(title) = create_text(host, ctx, "Layout Error", title_opts) {
        host.append_child(frame, title);
    }

    let body = format!(
        "Failed to create layout: {}\nStep: {}\nError: {message}",
        step.layout_type.as_str(),
        step.step_name
    );
    let details_opts = TextOptions::body()
        .size(tokens.font_sizes.caption)
        .color(Rgba::opaque(0.6, 0.1, 0.1))
        .align(TextAlign::Center);
    if let Ok(details) = create_text(host, ctx, &body, details_opts) {
        host.append_child(frame, details);
    }

    frame
}
