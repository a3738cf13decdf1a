//! Generation context threaded through builders and component factories.

use crate::fonts::FontCache;
use crate::tokens::DesignTokens;

/// Everything a builder may consult besides the step itself: the read-only
/// token table and the session's font-load cache. Constructed per generation
/// request; never ambient.
pub struct GenContext<'a> {
    pub tokens: &'a DesignTokens,
    pub fonts: &'a mut FontCache,
}

impl<'a> GenContext<'a> {
    pub fn new(tokens: &'a DesignTokens, fonts: &'a mut FontCache) -> Self {
        Self { tokens, fonts }
    }
}
