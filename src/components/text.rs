//! Text node factory.
//!
//! Every text node funnels through [`create_text`], which resolves unset
//! options from the token table and warms the typeface through the font
//! cache before use.

use crate::context::GenContext;
use crate::foundation::core::{Rgba, Size};
use crate::foundation::error::OnboarderResult;
use crate::host::{FontRef, NodeId, SceneHost, TextAlign, TextCase};
use crate::tokens::DesignTokens;

/// Options for one text node. Unset fields fall back to the token table's
/// body style (primary font, body size, primary color, left aligned).
#[derive(Clone, Debug, Default)]
pub struct TextOptions {
    pub font_size: Option<f64>,
    pub font: Option<FontRef>,
    pub color: Option<Rgba>,
    pub align: TextAlign,
    pub case: TextCase,
    pub max_width: Option<f64>,
}

impl TextOptions {
    /// Hero headline: bold, headline size, centered.
    pub fn headline(tokens: &DesignTokens) -> Self {
        Self {
            font_size: Some(tokens.font_sizes.headline),
            font: Some(tokens.fonts.bold.clone()),
            align: TextAlign::Center,
            ..Self::default()
        }
    }

    /// Section title: bold, title size.
    pub fn title(tokens: &DesignTokens) -> Self {
        Self {
            font_size: Some(tokens.font_sizes.title),
            font: Some(tokens.fonts.bold.clone()),
            ..Self::default()
        }
    }

    /// Subtitle: subtitle size, centered.
    pub fn subtitle(tokens: &DesignTokens) -> Self {
        Self {
            font_size: Some(tokens.font_sizes.subtitle),
            align: TextAlign::Center,
            ..Self::default()
        }
    }

    /// Body copy with every default.
    pub fn body() -> Self {
        Self::default()
    }

    /// Caption: caption size, secondary color.
    pub fn caption(tokens: &DesignTokens) -> Self {
        Self {
            font_size: Some(tokens.font_sizes.caption),
            color: Some(tokens.colors.secondary),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn font(mut self, font: FontRef) -> Self {
        self.font = Some(font);
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn upper(mut self) -> Self {
        self.case = TextCase::Upper;
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub fn create_text(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    content: &str,
    opts: TextOptions,
) -> OnboarderResult<NodeId> {
    let font = opts
        .font
        .unwrap_or_else(|| ctx.tokens.fonts.primary.clone());
    ctx.fonts.ensure(host, &font)?;

    let node = host.create_text();
    host.set_font(node, &font);
    host.set_characters(node, content);
    host.set_font_size(node, opts.font_size.unwrap_or(ctx.tokens.font_sizes.body));
    host.set_text_color(node, opts.color.unwrap_or(ctx.tokens.colors.primary));
    host.set_text_align(node, opts.align);
    if opts.case != TextCase::Original {
        host.set_text_case(node, opts.case);
    }
    if let Some(width) = opts.max_width {
        // Fixed width, height follows the wrapped text.
        host.resize(node, Size::new(width, 0.0));
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontCache;
    use crate::host::memory::MemoryDocument;

    #[test]
    fn defaults_resolve_from_tokens() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_text(&mut doc, &mut ctx, "hello", TextOptions::body()).unwrap();
        let text = doc.node(node).text.as_ref().unwrap();
        assert_eq!(text.characters, "hello");
        assert_eq!(text.font_size, tokens.font_sizes.body);
        assert_eq!(text.font.as_ref().unwrap(), &tokens.fonts.primary);
        assert!(ctx.fonts.is_loaded(&tokens.fonts.primary));
    }

    #[test]
    fn presets_pick_token_styles() {
        let tokens = DesignTokens::default();
        let mut fonts = FontCache::new();
        let mut ctx = GenContext::new(&tokens, &mut fonts);
        let mut doc = MemoryDocument::new();

        let node = create_text(
            &mut doc,
            &mut ctx,
            "Welcome",
            TextOptions::headline(&tokens),
        )
        .unwrap();
        let text = doc.node(node).text.as_ref().unwrap();
        assert_eq!(text.font_size, tokens.font_sizes.headline);
        assert_eq!(text.font.as_ref().unwrap(), &tokens.fonts.bold);
        assert_eq!(text.align, TextAlign::Center);
    }
}
