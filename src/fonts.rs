//! Idempotent typeface loading.
//!
//! The host's font registration is a side effect worth caching: a flow with
//! many steps requests the same two or three typefaces over and over. The
//! cache is owned by the generation session and threaded through the context
//! explicitly, so concurrent sessions never share mutable state.

use std::collections::HashSet;

use crate::foundation::error::OnboarderResult;
use crate::host::{FontRef, SceneHost};
use crate::tokens::DesignTokens;

#[derive(Debug, Default)]
pub struct FontCache {
    loaded: HashSet<String>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `font` through the host unless it has already been loaded by this
    /// cache. Repeated requests resolve without touching the host.
    pub fn ensure(&mut self, host: &mut dyn SceneHost, font: &FontRef) -> OnboarderResult<()> {
        let key = font.cache_key();
        if self.loaded.contains(&key) {
            return Ok(());
        }
        host.load_font(font)?;
        self.loaded.insert(key);
        Ok(())
    }

    /// Warm every typeface in the token table before generation starts.
    pub fn warm(
        &mut self,
        host: &mut dyn SceneHost,
        tokens: &DesignTokens,
    ) -> OnboarderResult<()> {
        for font in tokens.fonts.all() {
            self.ensure(host, font)?;
        }
        Ok(())
    }

    pub fn is_loaded(&self, font: &FontRef) -> bool {
        self.loaded.contains(&font.cache_key())
    }
}
