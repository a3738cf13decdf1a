//! Per-step documentation subtree.
//!
//! Each step's layout is paired with a fixed-width annotation stack: a bold
//! step title, one label+body block per present annotation field, and an
//! input-field summary. Label and body share a single text node with two
//! font runs, so the pair never drifts apart when the host reflows text.

use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::{InputField, OnboardingStep};
use crate::foundation::core::{Edges, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost};

const ANNOTATION_WIDTH: f64 = 400.0;

/// Build the annotation stack for `step`, `index` 0-based out of `total`.
pub fn create_annotations(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
    index: usize,
    total: usize,
) -> OnboarderResult<NodeId> {
    let container = host.create_frame();
    host.set_name(container, "Annotations");
    host.set_auto_layout(
        container,
        AutoLayout::vertical(ctx.tokens.spacing.lg).fixed_cross(),
    );
    host.resize(container, Size::new(ANNOTATION_WIDTH, 0.0));
    host.set_padding(container, Edges::all(ctx.tokens.spacing.lg));
    host.set_fill(container, None);

    let title_opts = TextOptions::title(ctx.tokens);
    let title = create_text(
        host,
        ctx,
        &format!("Step {} of {}: {}", index + 1, total, step.step_name),
        title_opts,
    )?;
    host.append_child(container, title);

    let modal_type = step.modal_type.map(|m| m.as_str().to_owned());
    let blocks: [(&str, Option<&str>); 6] = [
        ("UX Goal", step.ux_goal.as_deref()),
        ("User Action", step.user_action.as_deref()),
        ("Rationale", step.rationale.as_deref()),
        ("Layout Type", Some(step.layout_type.as_str())),
        ("Modal Type", modal_type.as_deref()),
        ("CTA Type", step.cta_type.as_deref()),
    ];
    for (label, body) in blocks {
        if let Some(body) = body {
            let block = create_label_body_text(host, ctx, label, body)?;
            host.append_child(container, block);
        }
    }

    if step.has_fields() {
        let summary = create_fields_summary(host, ctx, step.fields())?;
        host.append_child(container, summary);
    }

    Ok(container)
}

/// One `"Label:\n<body>"` text node: the label range bold, the body regular.
fn create_label_body_text(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    label: &str,
    body: &str,
) -> OnboarderResult<NodeId> {
    let bold = ctx.tokens.fonts.bold.clone();
    let regular = ctx.tokens.fonts.primary.clone();
    ctx.fonts.ensure(host, &bold)?;
    ctx.fonts.ensure(host, &regular)?;

    let label_part = format!("{label}:\n");
    let full = format!("{label_part}{body}");

    let node = host.create_text();
    host.set_name(node, label);
    host.set_font(node, &regular);
    host.set_characters(node, &full);
    host.set_font_size(node, ctx.tokens.font_sizes.caption);
    host.set_text_color(node, ctx.tokens.colors.primary);
    host.set_range_font(node, 0, label_part.len(), &bold);
    host.set_range_font(node, label_part.len(), full.len(), &regular);
    Ok(node)
}

fn create_fields_summary(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    fields: &[InputField],
) -> OnboarderResult<NodeId> {
    let container = host.create_frame();
    host.set_name(container, "Input Fields Summary");
    host.set_auto_layout(container, AutoLayout::vertical(ctx.tokens.spacing.xs));
    host.set_fill(container, None);

    let heading_opts = TextOptions::body()
        .size(ctx.tokens.font_sizes.small)
        .font(ctx.tokens.fonts.bold.clone())
        .color(ctx.tokens.colors.secondary)
        .upper();
    let heading = create_text(host, ctx, "INPUT FIELDS", heading_opts)?;
    host.append_child(container, heading);

    let listing = fields
        .iter()
        .map(|f| {
            let marker = if f.required { " *" } else { "" };
            format!("\u{2022} {} ({}){marker}", f.label, f.field_type.as_str())
        })
        .collect::<Vec<_>>()
        .join("\n");
    let body = create_text(host, ctx, &listing, TextOptions::body())?;
    host.append_child(container, body);

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::model::{FieldType, LayoutType, ModalType};
    use crate::fonts::FontCache;
    use crate::host::memory::MemoryDocument;
    use crate::tokens::DesignTokens;

    fn annotated_step() -> OnboardingStep {
        let mut step = OnboardingStep::new("Collect Details", LayoutType::ModalForm);
        step.ux_goal = Some("Capture the basics".to_owned());
        step.rationale = Some("Less typing later".to_owned());
        step.modal_type = Some(ModalType::Form);
        let mut email = InputField::from_label("Email");
        email.field_type = FieldType::Email;
        email.required = true;
        step.input_fields = Some(vec![email, InputField::from_label("Name")]);
        step
    }

    #[test]
    fn title_counts_steps_from_one() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_annotations(&mut doc, &mut ctx, &annotated_step(), 2, 5).unwrap();
        let title = doc.children(node)[0];
        assert_eq!(doc.characters(title), "Step 3 of 5: Collect Details");
    }

    #[test]
    fn absent_fields_are_skipped_present_ordered() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_annotations(&mut doc, &mut ctx, &annotated_step(), 0, 1).unwrap();
        let names: Vec<String> = doc
            .children(node)
            .iter()
            .map(|c| doc.node_name(*c))
            .collect();
        // Title, UX Goal, Rationale, Layout Type, Modal Type, summary; no
        // User Action or CTA Type blocks.
        assert_eq!(
            names,
            vec![
                "",
                "UX Goal",
                "Rationale",
                "Layout Type",
                "Modal Type",
                "Input Fields Summary"
            ]
        );
    }

    #[test]
    fn label_and_body_share_one_node_with_two_runs() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_label_body_text(&mut doc, &mut ctx, "UX Goal", "Capture").unwrap();
        let text = doc.node(node).text.as_ref().unwrap();
        assert_eq!(text.characters, "UX Goal:\nCapture");
        assert_eq!(text.runs.len(), 2);
        assert_eq!(text.runs[0].font, tokens.fonts.bold);
        assert_eq!(text.runs[0].end, "UX Goal:\n".len());
        assert_eq!(text.runs[1].font, tokens.fonts.primary);
        assert_eq!(text.runs[1].end, text.characters.len());
    }

    #[test]
    fn summary_lists_fields_with_required_marker() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let step = annotated_step();
        let node = create_fields_summary(&mut doc, &mut ctx, step.fields()).unwrap();
        let listing = doc.children(node)[1];
        assert_eq!(
            doc.characters(listing),
            "\u{2022} Email (email) *\n\u{2022} Name (text)"
        );
    }
}
