//! Full-screen hero layout: centered vertical stack on a desktop canvas.

use crate::components::button::{ButtonOptions, ButtonSize, create_button};
use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::OnboardingStep;
use crate::foundation::core::{Edges, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost, ShapeKind, TextAlign};
use crate::layout::LayoutBuilder;

pub struct FullScreenLayout;

impl LayoutBuilder for FullScreenLayout {
    fn name(&self) -> &'static str {
        "Full Screen Layout"
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
            AutoLayout::vertical(tokens.spacing.lg)
                .centered()
                .fixed_main()
                .fixed_cross(),
        );
        host.resize(frame, tokens.dimensions.desktop);
        host.set_padding(frame, Edges::vertical(tokens.spacing.xxxxl));
        host.set_fill(frame, Some(tokens.colors.white));

        let icon = create_icon_placeholder(host, ctx);
        host.append_child(frame, icon);

        if let Some(headline) = &step.headline {
            let node = create_text(host, ctx, headline, TextOptions::headline(tokens))?;
            host.append_child(frame, node);
        }

        if let Some(subtitle) = &step.subtitle {
            let node = create_text(host, ctx, subtitle, TextOptions::subtitle(tokens))?;
            host.append_child(frame, node);
        }

        if let Some(copy) = &step.marketing_copy {
            let node = create_text(
                host,
                ctx,
                copy,
                TextOptions::body().align(TextAlign::Center).max_width(600.0),
            )?;
            host.append_child(frame, node);
        }

        if let Some(cta) = &step.cta {
            let button = create_button(
                host,
                ctx,
                cta,
                ButtonOptions::primary().size(ButtonSize::Large).width(200.0),
            )?;
            host.append_child(frame, button);
        }

        if step.has_fields() {
            let checklist = create_checklist_row(host, ctx, step)?;
            host.append_child(frame, checklist);
        }

        Ok(frame)
    }
}

fn create_icon_placeholder(host: &mut dyn SceneHost, ctx: &mut GenContext<'_>) -> NodeId {
    let tokens = ctx.tokens;
    let icon_frame = host.create_frame();
    host.set_name(icon_frame, "Icon Placeholder");
    host.set_auto_layout(
        icon_frame,
        AutoLayout::vertical(0.0).centered().fixed_main().fixed_cross(),
    );
    host.resize(icon_frame, tokens.dimensions.icon);
    host.set_corner_radius(icon_frame, tokens.radius.xl);
    host.set_padding(icon_frame, Edges::all(tokens.spacing.md));
    host.set_fill(icon_frame, Some(tokens.colors.secondary));

    let icon = host.create_shape(ShapeKind::Ellipse);
    host.set_name(icon, "Icon");
    host.resize(icon, Size::new(40.0, 40.0));
    host.set_fill(icon, Some(tokens.colors.white));
    host.append_child(icon_frame, icon);

    icon_frame
}

/// Hero steps occasionally carry input fields; render them as a one-line
/// checklist of field labels rather than a full form.
fn create_checklist_row(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
) -> OnboarderResult<NodeId> {
    let tokens = ctx.tokens;
    let row = host.create_frame();
    host.set_name(row, "Checklist");
    host.set_auto_layout(
        row,
        AutoLayout::horizontal(tokens.spacing.lg).centered(),
    );
    host.set_fill(row, None);

    for field in step.fields() {
        let item = host.create_frame();
        host.set_auto_layout(
            item,
            AutoLayout::horizontal(tokens.spacing.sm).centered(),
        );
        host.set_fill(item, None);

        let check = host.create_shape(ShapeKind::Ellipse);
        host.resize(check, Size::new(16.0, 16.0));
        host.set_fill(check, Some(tokens.colors.success));
        host.append_child(item, check);

        let label = create_text(host, ctx, &field.label, TextOptions::caption(tokens))?;
        host.append_child(item, label);

        host.append_child(row, item);
    }

    Ok(row)
}
