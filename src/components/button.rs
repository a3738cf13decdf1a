//! Button factory.

use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::foundation::core::{Edges, Rgba, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{AutoLayout, NodeId, SceneHost, Stroke, TextAlign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonOptions {
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub width: Option<f64>,
    pub disabled: bool,
}

impl ButtonOptions {
    pub fn primary() -> Self {
        Self::default()
    }

    pub fn secondary() -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::default()
        }
    }

    pub fn ghost() -> Self {
        Self {
            variant: ButtonVariant::Ghost,
            ..Self::default()
        }
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

struct SizeConfig {
    height: f64,
    padding_x: f64,
    padding_y: f64,
    font_size: f64,
}

struct VariantConfig {
    background: Rgba,
    text: Rgba,
    border: Option<Rgba>,
}

pub fn create_button(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    label: &str,
    opts: ButtonOptions,
) -> OnboarderResult<NodeId> {
    let tokens = ctx.tokens;
    let size = size_config(ctx, opts.size);
    let variant = variant_config(ctx, opts.variant, opts.disabled);

    let button = host.create_frame();
    host.set_name(button, &format!("Button - {label}"));
    host.set_padding(button, Edges::symmetric(size.padding_x, size.padding_y));
    host.set_corner_radius(button, tokens.radius.md);
    host.set_fill(button, Some(variant.background));
    if let Some(border) = variant.border {
        host.set_stroke(button, Some(Stroke::hairline(border)));
    }
    if opts.variant == ButtonVariant::Primary && !opts.disabled {
        host.set_shadow(button, Some(tokens.shadows.sm));
    }

    let mut layout = AutoLayout::horizontal(0.0).centered();
    if opts.width.is_some() {
        layout = layout.fixed_main();
    }
    host.set_auto_layout(button, layout);
    if let Some(width) = opts.width {
        host.resize(button, Size::new(width, size.height));
    }

    let text_opts = TextOptions::body()
        .size(size.font_size)
        .font(tokens.fonts.medium.clone())
        .color(variant.text)
        .align(TextAlign::Center);
    let text = create_text(host, ctx, label, text_opts)?;
    host.append_child(button, text);

    Ok(button)
}

fn size_config(ctx: &GenContext<'_>, size: ButtonSize) -> SizeConfig {
    let spacing = ctx.tokens.spacing;
    let sizes = ctx.tokens.font_sizes;
    match size {
        ButtonSize::Small => SizeConfig {
            height: 36.0,
            padding_x: spacing.md,
            padding_y: spacing.sm,
            font_size: sizes.caption,
        },
        ButtonSize::Medium => SizeConfig {
            height: ctx.tokens.dimensions.button_height,
            padding_x: spacing.lg,
            padding_y: spacing.md,
            font_size: sizes.body,
        },
        ButtonSize::Large => SizeConfig {
            height: 56.0,
            padding_x: spacing.lg,
            padding_y: spacing.md,
            font_size: sizes.body,
        },
    }
}

fn variant_config(ctx: &GenContext<'_>, variant: ButtonVariant, disabled: bool) -> VariantConfig {
    let colors = ctx.tokens.colors;
    if disabled {
        return VariantConfig {
            background: colors.border,
            text: colors.secondary,
            border: None,
        };
    }
    match variant {
        ButtonVariant::Primary => VariantConfig {
            background: colors.accent,
            text: colors.white,
            border: None,
        },
        ButtonVariant::Secondary => VariantConfig {
            background: colors.white,
            text: colors.accent,
            border: Some(colors.accent),
        },
        ButtonVariant::Ghost => VariantConfig {
            background: Rgba::transparent(),
            text: colors.accent,
            border: None,
        },
    }
}
