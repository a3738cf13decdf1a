//! Modal layout: a full-canvas scrim behind a centered card.
//!
//! One builder serves both `modal_layout` and `modal_form`; the card content
//! branches on the step's `modalType`, defaulting to the welcome arrangement.

use crate::components::button::{ButtonOptions, create_button};
use crate::components::form::create_form;
use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::{ModalType, OnboardingStep};
use crate::foundation::core::{Edges, Rgba, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost, ShapeKind, TextAlign};
use crate::layout::LayoutBuilder;

const FORM_MODAL_WIDTH: f64 = 500.0;

pub struct ModalLayout;

impl LayoutBuilder for ModalLayout {
    fn name(&self) -> &'static str {
        "Modal Layout"
    }

    fn build(
        &self,
        host: &mut dyn SceneHost,
        ctx: &mut GenContext<'_>,
        step: &OnboardingStep,
    ) -> OnboarderResult<NodeId> {
        let tokens = ctx.tokens;

        let background = host.create_frame();
        host.set_name(background, &format!("{} - Modal Background", step.step_name));
        host.set_auto_layout(
            background,
            AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
        );
        host.resize(background, tokens.dimensions.desktop);
        host.set_fill(background, Some(Rgba::new(0.0, 0.0, 0.0, 0.5)));

        let width = if step.modal_type == Some(ModalType::Form) {
            FORM_MODAL_WIDTH
        } else {
            tokens.dimensions.modal.width
        };
        let modal = host.create_frame();
        host.set_name(modal, "Modal");
        host.set_auto_layout(
            modal,
            AutoLayout::vertical(tokens.spacing.lg).fixed_cross(),
        );
        host.resize(modal, Size::new(width, 0.0));
        host.set_padding(modal, Edges::all(tokens.spacing.xl));
        host.set_corner_radius(modal, tokens.radius.lg);
        host.set_fill(modal, Some(tokens.colors.white));
        host.set_shadow(modal, Some(tokens.shadows.lg));

        match step.modal_type {
            Some(ModalType::Form) => add_form_content(host, ctx, modal, step)?,
            Some(ModalType::Confirmation) => add_confirmation_content(host, ctx, modal, step)?,
            Some(ModalType::Summary) => add_summary_content(host, ctx, modal, step)?,
            Some(ModalType::Welcome) | None => add_welcome_content(host, ctx, modal, step)?,
        }

        host.append_child(background, modal);
        Ok(background)
    }
}

fn add_welcome_content(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    modal: NodeId,
    step: &OnboardingStep,
) -> OnboarderResult<()> {
    let tokens = ctx.tokens;
    let icon = create_modal_icon(host, ctx);
    host.append_child(modal, icon);

    if let Some(headline) = &step.headline {
        let opts = TextOptions::title(tokens).align(TextAlign::Center);
        let node = create_text(host, ctx, headline, opts)?;
        host.append_child(modal, node);
    }

    if let Some(subtitle) = &step.subtitle {
        let opts = TextOptions::body()
            .align(TextAlign::Center)
            .color(tokens.colors.secondary);
        let node = create_text(host, ctx, subtitle, opts)?;
        host.append_child(modal, node);
    }

    if let Some(cta) = &step.cta {
        let button = create_button(host, ctx, cta, ButtonOptions::primary().width(200.0))?;
        host.append_child(modal, button);
    }

    Ok(())
}

fn add_form_content(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    modal: NodeId,
    step: &OnboardingStep,
) -> OnboarderResult<()> {
    let tokens = ctx.tokens;
    if let Some(headline) = &step.headline {
        let opts = TextOptions::title(tokens).align(TextAlign::Center);
        let node = create_text(host, ctx, headline, opts)?;
        host.append_child(modal, node);
    }

    if let Some(subtitle) = &step.subtitle {
        let opts = TextOptions::body()
            .align(TextAlign::Center)
            .color(tokens.colors.secondary);
        let node = create_text(host, ctx, subtitle, opts)?;
        host.append_child(modal, node);
    }

    if step.has_fields() {
        let form = create_form(host, ctx, step.fields())?;
        host.append_child(modal, form);
    }

    let buttons = host.create_frame();
    host.set_name(buttons, "Button Container");
    host.set_auto_layout(buttons, AutoLayout::horizontal(tokens.spacing.md));
    host.set_fill(buttons, None);

    let cancel = create_button(host, ctx, "Cancel", ButtonOptions::secondary())?;
    host.append_child(buttons, cancel);

    if let Some(cta) = &step.cta {
        let primary = create_button(host, ctx, cta, ButtonOptions::primary())?;
        host.append_child(buttons, primary);
    }

    host.append_child(modal, buttons);
    Ok(())
}

fn add_confirmation_content(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    modal: NodeId,
    step: &OnboardingStep,
) -> OnboarderResult<()> {
    let tokens = ctx.tokens;
    let icon = create_success_icon(host, ctx);
    host.append_child(modal, icon);

    if let Some(headline) = &step.headline {
        let opts = TextOptions::title(tokens)
            .align(TextAlign::Center)
            .color(tokens.colors.success);
        let node = create_text(host, ctx, headline, opts)?;
        host.append_child(modal, node);
    }

    if let Some(subtitle) = &step.subtitle {
        let opts = TextOptions::body().align(TextAlign::Center);
        let node = create_text(host, ctx, subtitle, opts)?;
        host.append_child(modal, node);
    }

    if let Some(cta) = &step.cta {
        let button = create_button(host, ctx, cta, ButtonOptions::primary().width(150.0))?;
        host.append_child(modal, button);
    }

    Ok(())
}

fn add_summary_content(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    modal: NodeId,
    step: &OnboardingStep,
) -> OnboarderResult<()> {
    let tokens = ctx.tokens;
    if let Some(headline) = &step.headline {
        let opts = TextOptions::title(tokens).align(TextAlign::Center);
        let node = create_text(host, ctx, headline, opts)?;
        host.append_child(modal, node);
    }

    if let Some(copy) = &step.marketing_copy {
        let node = create_text(host, ctx, copy, TextOptions::body().align(TextAlign::Center))?;
        host.append_child(modal, node);
    }

    if let Some(cta) = &step.cta {
        let button = create_button(host, ctx, cta, ButtonOptions::primary().width(200.0))?;
        host.append_child(modal, button);
    }

    Ok(())
}

fn create_modal_icon(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let icon_frame = host.create_frame();
    host.set_name(icon_frame, "Modal Icon");
    host.set_auto_layout(
        icon_frame,
        AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
    );
    host.resize(icon_frame, Size::new(48.0, 48.0));
    host.set_corner_radius(icon_frame, tokens.radius.md);
    host.set_fill(icon_frame, Some(tokens.colors.accent));

    let dot = host.create_shape(ShapeKind::Ellipse);
    host.resize(dot, Size::new(24.0, 24.0));
    host.set_fill(dot, Some(tokens.colors.white));
    host.append_child(icon_frame, dot);

    icon_frame
}

fn create_success_icon(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let icon_frame = host.create_frame();
    host.set_name(icon_frame, "Success Icon");
    host.set_auto_layout(
        icon_frame,
        AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
    );
    host.resize(icon_frame, Size::new(64.0, 64.0));
    host.set_corner_radius(icon_frame, tokens.radius.round);
    host.set_fill(icon_frame, Some(tokens.colors.success));

    let checkmark = host.create_shape(ShapeKind::Ellipse);
    host.resize(checkmark, Size::new(32.0, 32.0));
    host.set_fill(checkmark, Some(tokens.colors.white));
    host.append_child(icon_frame, checkmark);

    icon_frame
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
        let node = ModalLayout.build(&mut doc, &mut ctx, step).unwrap();
        (doc, node)
    }

    #[test]
    fn scrim_wraps_the_card() {
        let mut step = OnboardingStep::new("Welcome", LayoutType::ModalLayout);
        step.headline = Some("Hello".to_owned());
        let (doc, background) = build(&step);

        assert_eq!(doc.node_name(background), "Welcome - Modal Background");
        assert_eq!(doc.node(background).fill, Some(Rgba::new(0.0, 0.0, 0.0, 0.5)));
        let modal = doc.children(background)[0];
        assert_eq!(doc.node_name(modal), "Modal");
        assert_eq!(doc.node(modal).size.width, 600.0);
    }

    #[test]
    fn form_modal_is_narrower_and_has_button_pair() {
        let mut step = OnboardingStep::new("Details", LayoutType::ModalForm);
        step.headline = Some("About you".to_owned());
        step.modal_type = Some(ModalType::Form);
        step.cta = Some("Save".to_owned());
        step.input_fields = Some(vec![InputField::from_label("Email")]);
        let (doc, background) = build(&step);

        let modal = doc.children(background)[0];
        assert_eq!(doc.node(modal).size.width, FORM_MODAL_WIDTH);

        let children = doc.children(modal);
        let buttons = *children.last().unwrap();
        assert_eq!(doc.node_name(buttons), "Button Container");
        let pair = doc.children(buttons);
        assert_eq!(pair.len(), 2);
        assert_eq!(doc.node_name(pair[0]), "Button - Cancel");
        assert_eq!(doc.node_name(pair[1]), "Button - Save");
        assert!(children.iter().any(|c| doc.node_name(*c) == "Form"));
    }

    #[test]
    fn confirmation_gets_success_treatment() {
        let mut step = OnboardingStep::new("Done", LayoutType::ModalLayout);
        step.headline = Some("All set".to_owned());
        step.modal_type = Some(ModalType::Confirmation);
        let (doc, background) = build(&step);

        let modal = doc.children(background)[0];
        let children = doc.children(modal);
        assert_eq!(doc.node_name(children[0]), "Success Icon");
        let headline = doc.node(children[1]).text.as_ref().unwrap();
        assert_eq!(headline.color, Some(DesignTokens::default().colors.success));
    }

    #[test]
    fn missing_modal_type_renders_welcome() {
        let mut step = OnboardingStep::new("Intro", LayoutType::ModalLayout);
        step.headline = Some("Hi".to_owned());
        let (doc, background) = build(&step);

        let modal = doc.children(background)[0];
        let children = doc.children(modal);
        assert_eq!(doc.node_name(children[0]), "Modal Icon");
    }
}
