//! Tooltip overlay: a simplified app mockup with a floating card.
//!
//! The only layout positioned by explicit coordinates: the mockup is centered
//! on the canvas and the card is offset from the mockup's origin, not flowed.

use crate::components::button::{ButtonOptions, ButtonSize, create_button};
use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::OnboardingStep;
use crate::foundation::core::{Edges, Point, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost, TextAlign};
use crate::layout::LayoutBuilder;

const MOCKUP_SIZE: Size = Size::new(800.0, 600.0);
const CARD_OFFSET: (f64, f64) = (200.0, 150.0);

pub struct TooltipLayout;

impl LayoutBuilder for TooltipLayout {
    fn name(&self) -> &'static str {
        "Tooltip Layout"
    }

    fn build(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> OnboarderResult<NodeId> {
        let tokens = ctx.tokens;
        let desktop = tokens.dimensions.desktop;

        // No auto-layout on the background: children are absolutely placed.
        let background = host.create_frame();
        host.set_name(background, &format!("{} - Tooltip Context", step.step_name));
        host.resize(background, desktop);
        host.set_fill(background, Some(tokens.colors.background));

        let mockup = create_app_mockup(host, ctx);
        let mockup_origin = Point::new(
            (desktop.width - MOCKUP_SIZE.width) / 2.0,
            (desktop.height - MOCKUP_SIZE.height) / 2.0,
        );
        host.set_position(mockup, mockup_origin);
        host.append_child(background, mockup);

        let tooltip = create_tooltip_card(host, ctx, step)?;
        host.set_position(
            tooltip,
            Point::new(
                mockup_origin.x + CARD_OFFSET.0,
                mockup_origin.y + CARD_OFFSET.1,
            ),
        );
        host.append_child(background, tooltip);

        Ok(background)
    }
}

fn create_app_mockup(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let mockup = host.create_frame();
    host.set_name(mockup, "App Mockup");
    host.set_auto_layout(
        mockup,
        AutoLayout::vertical(tokens.spacing.md).fixed_cross(),
    );
    host.resize(mockup, MOCKUP_SIZE);
    host.set_corner_radius(mockup, tokens.radius.lg);
    host.set_padding(mockup, Edges::all(tokens.spacing.lg));
    host.set_fill(mockup, Some(tokens.colors.white));
    host.set_shadow(mockup, Some(tokens.shadows.md));

    let header = host.create_frame();
    host.set_name(header, "Header");
    host.resize(header, Size::new(750.0, 60.0));
    host.set_corner_radius(header, tokens.radius.md);
    host.set_fill(header, Some(tokens.colors.background));
    host.append_child(mockup, header);

    let content = host.create_frame();
    host.set_name(content, "Content Area");
    host.resize(content, Size::new(750.0, 400.0));
    host.set_corner_radius(content, tokens.radius.md);
    host.set_fill(content, Some(tokens.colors.background));
    host.append_child(mockup, content);

    mockup
}

fn create_tooltip_card(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
) -> OnboarderResult<NodeId> {
    let tokens = ctx.tokens;
    let tooltip = host.create_frame();
    host.set_name(tooltip, "Tooltip");
    host.set_auto_layout(
        tooltip,
        AutoLayout::vertical(tokens.spacing.md).fixed_cross(),
    );
    host.resize(tooltip, Size::new(tokens.dimensions.tooltip.width, 0.0));
    host.set_padding(tooltip, Edges::all(tokens.spacing.lg));
    host.set_corner_radius(tooltip, tokens.radius.lg);
    host.set_fill(tooltip, Some(tokens.colors.white));
    host.set_shadow(tooltip, Some(tokens.shadows.lg));

    if let Some(headline) = &step.headline {
        let node = create_text(
            host,
            ctx,
            headline,
            TextOptions::body()
                .font(tokens.fonts.bold.clone())
                .align(TextAlign::Left),
        )?;
        host.append_child(tooltip, node);
    }

    if let Some(subtitle) = &step.subtitle {
        let node = create_text(
            host,
            ctx,
            subtitle,
            TextOptions::caption(tokens).align(TextAlign::Left),
        )?;
        host.append_child(tooltip, node);
    }

    let footer = create_tooltip_footer(host, ctx, step)?;
    host.append_child(tooltip, footer);

    Ok(tooltip)
}

fn create_tooltip_footer(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
) -> OnboarderResult<NodeId> {
    let tokens = ctx.tokens;
    let footer = host.create_frame();
    host.set_name(footer, "Tooltip Footer");
    host.set_auto_layout(
        footer,
        AutoLayout::horizontal(40.0).centered().fixed_main(),
    );
    host.resize(footer, Size::new(400.0, 50.0));
    host.set_padding(
        footer,
        Edges {
            top: tokens.spacing.lg,
            right: 0.0,
            bottom: tokens.spacing.md,
            left: 0.0,
        },
    );
    host.set_fill(footer, None);

    let progress = create_text(host, ctx, "1 of 4", TextOptions::caption(tokens))?;
    host.append_child(footer, progress);

    let skip = create_button(
        host,
        ctx,
        "Skip",
        ButtonOptions::ghost().size(ButtonSize::Small),
    )?;
    host.append_child(footer, skip);

    if let Some(cta) = &step.cta {
        let next = create_button(
            host,
            ctx,
            cta,
            ButtonOptions::primary().size(ButtonSize::Small),
        )?;
        host.append_child(footer, next);
    }

    Ok(footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::model::LayoutType;
    use crate::fonts::FontCache;
    use crate::host::memory::MemoryDocument;
    use crate::tokens::DesignTokens;

    fn build(step: &OnboardingStep) -> (MemoryDocument, NodeId) {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();
        let node = TooltipLayout.build(&mut doc, &mut ctx, step).unwrap();
        (doc, node)
    }

    fn tooltip_step() -> OnboardingStep {
        let mut step = OnboardingStep::new("Point Out", LayoutType::TooltipOverlay);
        step.headline = Some("This is the dashboard".to_owned());
        step.subtitle = Some("Everything starts here".to_owned());
        step.cta = Some("Next".to_owned());
        step
    }

    #[test]
    fn card_is_offset_from_the_mockup() {
        let (doc, background) = build(&tooltip_step());
        let children = doc.children(background);
        let mockup = children[0];
        let tooltip = children[1];

        // 1400x900 canvas, 800x600 mockup.
        assert_eq!(doc.node(mockup).position, Point::new(300.0, 150.0));
        assert_eq!(doc.node(tooltip).position, Point::new(500.0, 300.0));
        assert!(doc.node(background).layout.is_none());
    }

    #[test]
    fn footer_has_progress_skip_and_cta() {
        let (doc, background) = build(&tooltip_step());
        let tooltip = doc.children(background)[1];
        let footer = *doc.children(tooltip).last().unwrap();
        assert_eq!(doc.node_name(footer), "Tooltip Footer");

        let children = doc.children(footer);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.characters(children[0]), "1 of 4");
        assert_eq!(doc.node_name(children[1]), "Button - Skip");
        assert_eq!(doc.node_name(children[2]), "Button - Next");
    }
}
