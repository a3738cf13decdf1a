//! Procedural form-field rendering.
//!
//! One container per field: label on top, then the type-specific input
//! visual, then the optional validation line. Checkbox and radio fields carry
//! their label inside the row instead.

use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::{FieldType, InputField};
use crate::foundation::core::{Edges, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, AxisAlign, NodeId, SceneHost, ShapeKind, Stroke};

const FIELD_WIDTH: f64 = 300.0;
const TEXTAREA_HEIGHT: f64 = 120.0;

/// Vertical stack of rendered fields.
pub fn create_form(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    fields: &[InputField],
) -> OnboarderResult<NodeId> {
    let form = host.create_frame();
    host.set_name(form, "Form");
    host.set_auto_layout(form, AutoLayout::vertical(ctx.tokens.spacing.lg));
    host.set_fill(form, None);

    for field in fields {
        let rendered = create_input_field(host, ctx, field)?;
        host.append_child(form, rendered);
    }
    Ok(form)
}

/// One field: label, input visual, optional validation message.
pub fn create_input_field(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let container = host.create_frame();
    host.set_name(container, &format!("Input - {}", field.label));
    host.set_auto_layout(
        container,
        AutoLayout::vertical(ctx.tokens.spacing.xs).fixed_cross(),
    );
    host.resize(container, Size::new(FIELD_WIDTH, 0.0));
    host.set_fill(container, None);

    let label_text = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    let label_opts = TextOptions::body()
        .size(ctx.tokens.font_sizes.caption)
        .font(ctx.tokens.fonts.medium.clone());
    let label = create_text(host, ctx, &label_text, label_opts)?;
    host.append_child(container, label);

    let input = create_input_visual(host, ctx, field)?;
    host.append_child(container, input);

    if let Some(validation) = &field.validation {
        let message_opts = TextOptions::body()
            .size(ctx.tokens.font_sizes.small)
            .color(ctx.tokens.colors.error);
        let message = create_text(host, ctx, validation, message_opts)?;
        host.append_child(container, message);
    }

    Ok(container)
}

fn create_input_visual(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    match field.field_type {
        FieldType::Select | FieldType::Multiselect => create_select(host, ctx, field),
        FieldType::Checkbox => create_checkbox(host, ctx, field),
        FieldType::Radio => create_radio_group(host, ctx, field),
        FieldType::Textarea => create_textarea(host, ctx, field),
        FieldType::Text | FieldType::Email | FieldType::Number | FieldType::Date => {
            create_text_box(host, ctx, field)
        }
    }
}

fn input_chrome(host: &mut dyn SceneHost, ctx: &GenContext<'_>, node: NodeId) {
    host.set_corner_radius(node, ctx.tokens.radius.md);
    host.set_fill(node, Some(ctx.tokens.colors.white));
    host.set_stroke(node, Some(Stroke::hairline(ctx.tokens.colors.border)));
}

fn placeholder_text(field: &InputField, verb: &str) -> String {
    field
        .placeholder
        .clone()
        .unwrap_or_else(|| format!("{verb} {}", field.label.to_lowercase()))
}

fn create_text_box(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let input = host.create_frame();
    host.set_name(input, "Text Input");
    host.set_auto_layout(
        input,
        AutoLayout::horizontal(0.0)
            .cross_align(AxisAlign::Center)
            .fixed_main()
            .fixed_cross(),
    );
    host.resize(input, Size::new(FIELD_WIDTH, ctx.tokens.dimensions.input_height));
    host.set_padding(input, Edges::symmetric(ctx.tokens.spacing.md, 0.0));
    input_chrome(host, ctx, input);

    let opts = TextOptions::body().color(ctx.tokens.colors.secondary);
    let placeholder = create_text(host, ctx, &placeholder_text(field, "Enter"), opts)?;
    host.append_child(input, placeholder);
    Ok(input)
}

fn create_select(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let select = host.create_frame();
    host.set_name(select, "Select Input");
    host.set_auto_layout(
        select,
        AutoLayout::horizontal(ctx.tokens.spacing.sm)
            .cross_align(AxisAlign::Center)
            .fixed_main()
            .fixed_cross(),
    );
    host.resize(
        select,
        Size::new(FIELD_WIDTH, ctx.tokens.dimensions.input_height),
    );
    host.set_padding(select, Edges::symmetric(ctx.tokens.spacing.md, 0.0));
    input_chrome(host, ctx, select);

    let opts = TextOptions::body().color(ctx.tokens.colors.secondary);
    let placeholder = create_text(host, ctx, &placeholder_text(field, "Select"), opts)?;
    host.append_child(select, placeholder);

    let chevron = host.create_shape(ShapeKind::Vector);
    host.set_name(chevron, "Dropdown Arrow");
    host.resize(chevron, Size::new(12.0, 8.0));
    host.set_fill(chevron, Some(ctx.tokens.colors.secondary));
    host.append_child(select, chevron);

    Ok(select)
}

fn create_checkbox(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let row = host.create_frame();
    host.set_name(row, "Checkbox");
    host.set_auto_layout(
        row,
        AutoLayout::horizontal(ctx.tokens.spacing.sm).cross_align(AxisAlign::Center),
    );
    host.set_fill(row, None);

    let b = host.create_frame();
    host.resize(b, Size::new(20.0, 20.0));
    host.set_corner_radius(b, ctx.tokens.radius.sm);
    host.set_fill(b, Some(ctx.tokens.colors.white));
    host.set_stroke(b, Some(Stroke::hairline(ctx.tokens.colors.border)));
    host.append_child(row, b);

    let label = create_text(host, ctx, &field.label, TextOptions::body())?;
    host.append_child(row, label);

    Ok(row)
}

fn create_radio_group(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let group = host.create_frame();
    host.set_name(group, "Radio Group");
    host.set_auto_layout(group, AutoLayout::vertical(ctx.tokens.spacing.sm));
    host.set_fill(group, None);

    for option in field.options.as_deref().unwrap_or(&[]) {
        let row = host.create_frame();
        host.set_auto_layout(
            row,
            AutoLayout::horizontal(ctx.tokens.spacing.sm).cross_align(AxisAlign::Center),
        );
        host.set_fill(row, None);

        let radio = host.create_shape(ShapeKind::Ellipse);
        host.resize(radio, Size::new(16.0, 16.0));
        host.set_fill(radio, Some(ctx.tokens.colors.white));
        host.set_stroke(radio, Some(Stroke::hairline(ctx.tokens.colors.border)));
        host.append_child(row, radio);

        let label = create_text(host, ctx, option, TextOptions::body())?;
        host.append_child(row, label);

        host.append_child(group, row);
    }

    Ok(group)
}

fn create_textarea(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    field: &InputField,
) -> OnboarderResult<NodeId> {
    let textarea = host.create_frame();
    host.set_name(textarea, "Textarea");
    host.set_auto_layout(
        textarea,
        AutoLayout::vertical(0.0).fixed_main().fixed_cross(),
    );
    host.resize(textarea, Size::new(FIELD_WIDTH, TEXTAREA_HEIGHT));
    host.set_padding(textarea, Edges::all(ctx.tokens.spacing.md));
    input_chrome(host, ctx, textarea);

    let opts = TextOptions::body().color(ctx.tokens.colors.secondary);
    let placeholder = create_text(host, ctx, &placeholder_text(field, "Enter"), opts)?;
    host.append_child(textarea, placeholder);
    Ok(textarea)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontCache;
    use crate::host::memory::MemoryDocument;
    use crate::tokens::DesignTokens;

    fn field(label: &str, field_type: FieldType) -> InputField {
        InputField {
            field_type,
            ..InputField::from_label(label)
        }
    }

    #[test]
    fn required_field_label_carries_marker() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let mut f = field("Email", FieldType::Email);
        f.required = true;
        let node = create_input_field(&mut doc, &mut ctx, &f).unwrap();
        let label = doc.children(node)[0];
        assert_eq!(doc.characters(label), "Email *");
    }

    #[test]
    fn placeholder_defaults_from_label() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_text_box(&mut doc, &mut ctx, &field("Full Name", FieldType::Text))
            .unwrap();
        let placeholder = doc.children(node)[0];
        assert_eq!(doc.characters(placeholder), "Enter full name");
    }

    #[test]
    fn select_gets_a_chevron() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_input_visual(&mut doc, &mut ctx, &field("Role", FieldType::Select))
            .unwrap();
        let children = doc.children(node);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.node_name(children[1]), "Dropdown Arrow");
    }

    #[test]
    fn radio_group_renders_each_option() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let mut f = field("Team", FieldType::Radio);
        f.options = Some(vec!["Eng".to_owned(), "Design".to_owned(), "Ops".to_owned()]);
        let node = create_input_visual(&mut doc, &mut ctx, &f).unwrap();
        assert_eq!(doc.children(node).len(), 3);
    }

    #[test]
    fn validation_message_is_last_child() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let mut f = field("Email", FieldType::Email);
        f.validation = Some("Must be a work email".to_owned());
        let node = create_input_field(&mut doc, &mut ctx, &f).unwrap();
        let children = doc.children(node);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.characters(children[2]), "Must be a work email");
    }
}
