//! Split-screen layout: an image pane beside a content pane.
//!
//! The information-vs-form sub-arrangement is purely a function of whether
//! the step carries input fields.

use crate::components::button::{ButtonOptions, ButtonSize, create_button};
use crate::components::form::create_form;
use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::OnboardingStep;
use crate::foundation::core::{Edges, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, AxisAlign, NodeId, SceneHost, ShapeKind, TextAlign};
use crate::layout::LayoutBuilder;

const CONTENT_MAX_WIDTH: f64 = 500.0;

pub struct SplitScreenLayout;

impl LayoutBuilder for SplitScreenLayout {
    fn name(&self) -> &'static str {
        "Split Screen Layout"
    }

    fn build(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> OnboarderResult<NodeId> {
        let tokens = ctx.tokens;

        let frame = host.create_frame();
        host.set_name(frame, &step.step_name);
        host.set_auto_layout(
            frame,
            AutoLayout::horizontal(0.0).centered().fixed_main().fixed_cross(),
        );
        host.resize(frame, tokens.dimensions.desktop);
        host.set_fill(frame, Some(tokens.colors.white));

        let image_pane = create_image_section(host, ctx);
        host.append_child(frame, image_pane);

        let content_pane = create_content_section(host, ctx, step)?;
        host.append_child(frame, content_pane);

        Ok(frame)
    }
}

fn pane_size(ctx: &GenContext<'_>) -> Size {
    let desktop = ctx.tokens.dimensions.desktop;
    Size::new(desktop.width / 2.0, desktop.height)
}

fn create_image_section(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let section = host.create_frame();
    host.set_name(section, "Image Section");
    host.set_auto_layout(
        section,
        AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
    );
    host.resize(section, pane_size(ctx));
    host.set_fill(section, Some(tokens.colors.background));

    let placeholder = host.create_frame();
    host.set_name(placeholder, "Image Placeholder");
    host.set_auto_layout(
        placeholder,
        AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
    );
    host.resize(placeholder, Size::new(400.0, 300.0));
    host.set_corner_radius(placeholder, tokens.radius.lg);
    host.set_fill(placeholder, Some(tokens.colors.border));

    let icon = host.create_shape(ShapeKind::Rectangle);
    host.resize(icon, Size::new(80.0, 60.0));
    host.set_corner_radius(icon, tokens.radius.md);
    host.set_fill(icon, Some(tokens.colors.secondary));
    host.append_child(placeholder, icon);

    host.append_child(section, placeholder);
    section
}

fn create_content_section(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
) -> OnboarderResult<NodeId> {
    let tokens = ctx.tokens;
    let section = host.create_frame();
    host.set_name(section, "Content Section");
    host.set_auto_layout(
        section,
        AutoLayout::vertical(tokens.spacing.lg)
            .cross_align(AxisAlign::Center)
            .fixed_main()
            .fixed_cross(),
    );
    host.resize(section, pane_size(ctx));
    host.set_padding(
        section,
        Edges {
            top: tokens.spacing.xxxxl,
            right: tokens.spacing.xl,
            bottom: tokens.spacing.xxxxl,
            left: tokens.spacing.xxxxl,
        },
    );
    host.set_fill(section, Some(tokens.colors.white));

    let progress = create_progress_indicator(host, ctx);
    host.append_child(section, progress);

    if let Some(headline) = &step.headline {
        let node = create_text(
            host,
            ctx,
            headline,
            TextOptions::title(tokens)
                .align(TextAlign::Left)
                .max_width(CONTENT_MAX_WIDTH),
        )?;
        host.append_child(section, node);
    }

    if let Some(subtitle) = &step.subtitle {
        let node = create_text(
            host,
            ctx,
            subtitle,
            TextOptions::body()
                .color(tokens.colors.secondary)
                .max_width(CONTENT_MAX_WIDTH),
        )?;
        host.append_child(section, node);
    }

    if let Some(copy) = &step.marketing_copy {
        let node = create_text(
            host,
            ctx,
            copy,
            TextOptions::body().max_width(CONTENT_MAX_WIDTH),
        )?;
        host.append_child(section, node);
    }

    if step.has_fields() {
        let form = create_form(host, ctx, step.fields())?;
        host.append_child(section, form);
    }

    let buttons = host.create_frame();
    host.set_name(buttons, "Button Container");
    host.set_auto_layout(buttons, AutoLayout::horizontal(tokens.spacing.md));
    host.set_fill(buttons, None);

    let back = create_button(host, ctx, "Back", ButtonOptions::secondary())?;
    host.append_child(buttons, back);

    if let Some(cta) = &step.cta {
        let primary = create_button(
            host,
            ctx,
            cta,
            ButtonOptions::primary().size(ButtonSize::Large),
        )?;
        host.append_child(buttons, primary);
    }

    host.append_child(section, buttons);
    Ok(section)
}

fn create_progress_indicator(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let row = host.create_frame();
    host.set_name(row, "Progress Indicator");
    host.set_auto_layout(row, AutoLayout::horizontal(tokens.spacing.sm));
    host.set_fill(row, None);

    for i in 0..4 {
        let dot = host.create_shape(ShapeKind::Ellipse);
        host.set_name(dot, &format!("Progress Dot {}", i + 1));
        host.resize(dot, Size::new(8.0, 8.0));
        let color = if i == 0 {
            tokens.colors.accent
        } else {
            tokens.colors.border
        };
        host.set_fill(dot, Some(color));
        host.append_child(row, dot);
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::model::{InputField, LayoutType};
    use crate::fonts::FontCache;
    use crate::host::memory::MemoryDocument;
    use crate::tokens::DesignTokens;

    fn build(step: &OnboardingStep) -> (MemoryDocument, NodeId) {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();
        let node = SplitScreenLayout.build(&mut doc, &mut ctx, step).unwrap();
        (doc, node)
    }

    #[test]
    fn panes_split_the_canvas_evenly() {
        let mut step = OnboardingStep::new("Tour", LayoutType::SplitScreen);
        step.headline = Some("See around".to_owned());
        let (doc, frame) = build(&step);

        let panes = doc.children(frame);
        assert_eq!(panes.len(), 2);
        assert_eq!(doc.node_name(panes[0]), "Image Section");
        assert_eq!(doc.node_name(panes[1]), "Content Section");
        assert_eq!(doc.node(panes[0]).size.width, 700.0);
        assert_eq!(doc.node(panes[1]).size.width, 700.0);
    }

    #[test]
    fn information_arrangement_has_no_form() {
        let mut step = OnboardingStep::new("Tour", LayoutType::SplitScreen);
        step.marketing_copy = Some("All the things".to_owned());
        let (doc, frame) = build(&step);

        let content = doc.children(frame)[1];
        let names: Vec<String> = doc
            .children(content)
            .iter()
            .map(|c| doc.node_name(*c))
            .collect();
        assert!(!names.contains(&"Form".to_owned()));
    }

    #[test]
    fn fields_switch_to_the_form_arrangement() {
        let mut step = OnboardingStep::new("Details", LayoutType::SplitScreen);
        step.headline = Some("About you".to_owned());
        step.input_fields = Some(vec![InputField::from_label("Email")]);
        let (doc, frame) = build(&step);

        let content = doc.children(frame)[1];
        let names: Vec<String> = doc
            .children(content)
            .iter()
            .map(|c| doc.node_name(*c))
            .collect();
        assert!(names.contains(&"Form".to_owned()));
        assert!(names.contains(&"Button Container".to_owned()));
    }

    #[test]
    fn progress_dots_lead_the_content() {
        let mut step = OnboardingStep::new("Tour", LayoutType::SplitScreen);
        step.headline = Some("Hi".to_owned());
        let (doc, frame) = build(&step);

        let content = doc.children(frame)[1];
        let progress = doc.children(content)[0];
        assert_eq!(doc.node_name(progress), "Progress Indicator");
        assert_eq!(doc.children(progress).len(), 4);
    }
}
