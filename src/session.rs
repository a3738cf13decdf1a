//! The generation pipeline, from raw JSON text to appended frames.
//!
//! A session owns the token table, the layout registry, and the font cache,
//! and processes one UI request at a time against a host document. Step
//! generation is strictly sequential: a step's subtree (including any font
//! registration it triggers) completes before the next begins, because steps
//! are positioned left-to-right by index and later steps resolve fonts warmed
//! by earlier ones from the cache.

use serde_json::Value;

use crate::components::annotation::create_annotations;
use crate::components::text::{TextOptions, create_text};
use crate::context::GenContext;
use crate::flow::model::OnboardingStep;
use crate::flow::validate::{FlowValidation, ValidationMode, validate_flow};
use crate::fonts::FontCache;
use crate::foundation::core::{Point, Rgba, Size};
use crate::foundation::error::{OnboarderError, OnboarderResult};
use crate::host::{AutoLayout, NodeId, SceneHost, UiEvent};
use crate::layout::{LayoutRegistry, library};
use crate::tokens::{DesignTokens, LibraryKeys};

/// Message from the surrounding UI panel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UiRequest {
    GenerateScreens { json: String },
}

/// Session configuration. Constructed by the caller; nothing here is read
/// from ambient state.
#[derive(Clone, Debug)]
pub struct GenerateOpts {
    /// Strict rejects the batch on any validation error; lenient proceeds
    /// with the normalizable steps while surfacing every error.
    pub validation: ValidationMode,
    /// Try library-instance construction before the procedural builders.
    pub use_library: bool,
    /// Catalog keys for the published layout components.
    pub library: LibraryKeys,
    /// Horizontal gap between step containers.
    pub frame_gutter: f64,
    /// Vertical offset of every step container.
    pub frame_top_offset: f64,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            use_library: true,
            library: LibraryKeys::default(),
            frame_gutter: 80.0,
            frame_top_offset: 40.0,
        }
    }
}

/// What one generation run produced.
#[derive(Clone, Debug)]
pub struct GenerateReport {
    /// Per-step containers, in input order. Error subtrees count.
    pub frames: Vec<NodeId>,
    /// Steps generated (equals `frames.len()`).
    pub step_count: usize,
    /// Validation errors surfaced under lenient mode.
    pub errors: Vec<String>,
}

/// One generation session over a host document.
pub struct GenerateSession {
    opts: GenerateOpts,
    tokens: DesignTokens,
    registry: LayoutRegistry,
    fonts: FontCache,
}

impl GenerateSession {
    pub fn new(opts: GenerateOpts) -> Self {
        Self {
            opts,
            tokens: DesignTokens::default(),
            registry: LayoutRegistry::default(),
            fonts: FontCache::new(),
        }
    }

    pub fn with_tokens(mut self, tokens: DesignTokens) -> Self {
        self.tokens = tokens;
        self
    }

    /// Builder substitution point, used by hosts that bring their own layout
    /// strategies (and by tests that need a failing builder).
    pub fn registry_mut(&mut self) -> &mut LayoutRegistry {
        &mut self.registry
    }

    /// Process one UI request. Success notifies, selects, frames the
    /// viewport, posts the completion event, and closes the session; every
    /// failure path notifies and leaves the session open so diagnostics stay
    /// inspectable.
    #[tracing::instrument(skip_all)]
    pub fn handle(&mut self, host: &mut dyn SceneHost, request: UiRequest) {
        match request {
            UiRequest::GenerateScreens { json } => match self.generate(host, &json) {
                Ok(report) => finalize(host, &report),
                Err(OnboarderError::Validation(errors)) => {
                    tracing::warn!(%errors, "flow rejected");
                    host.notify(&format!("Validation errors:\n{errors}"), true);
                }
                Err(err) => {
                    tracing::error!(%err, "generation failed");
                    host.notify(&format!("Error processing JSON: {err}"), true);
                }
            },
        }
    }

    /// The embeddable core: parse, validate, preload, build and position one
    /// frame pair per step.
    #[tracing::instrument(skip_all)]
    pub fn generate(
        &mut self,
        host: &mut dyn SceneHost,
        json: &str,
    ) -> OnboarderResult<GenerateReport> {
        let raw: Value =
            serde_json::from_str(json).map_err(|e| OnboarderError::serde(e.to_string()))?;

        let (flow, errors) = match validate_flow(&raw, self.opts.validation) {
            FlowValidation::Accepted { flow, errors } => (flow, errors),
            FlowValidation::Rejected { errors } => {
                return Err(OnboarderError::validation(errors.join("\n")));
            }
        };

        let mut ctx = GenContext::new(&self.tokens, &mut self.fonts);

        // Preload: warm the token typefaces and the document's pages before
        // any step builds. Neither depends on step content.
        ctx.fonts.warm(host, ctx.tokens)?;
        host.load_all_pages()?;

        let total = flow.steps.len();
        let mut frames = Vec::with_capacity(total);
        for (index, step) in flow.steps.iter().enumerate() {
            let container =
                match build_step(host, &mut ctx, &self.registry, &self.opts, step, index, total)
                {
                    Ok(container) => container,
                    Err(err) => {
                        tracing::warn!(
                            step = %step.step_name,
                            index,
                            %err,
                            "step generation failed, appending error frame"
                        );
                        step_error_frame(host, &mut ctx, step, index, &err.to_string())
                    }
                };
            host.append_to_page(container);
            frames.push(container);
        }

        let stride = self.tokens.dimensions.desktop.width + self.opts.frame_gutter;
        for (index, frame) in frames.iter().enumerate() {
            host.set_position(
                *frame,
                Point::new(index as f64 * stride, self.opts.frame_top_offset),
            );
        }

        Ok(GenerateReport {
            step_count: frames.len(),
            frames,
            errors,
        })
    }
}

fn finalize(host: &mut dyn SceneHost, report: &GenerateReport) {
    if report.frames.is_empty() {
        host.notify("No frames were generated", true);
        return;
    }
    host.zoom_into_view(&report.frames);
    host.select(&report.frames);

    let count = report.frames.len();
    let plural = if count == 1 { "" } else { "s" };
    host.notify(&format!("Successfully generated {count} screen{plural}"), false);
    host.post_event(UiEvent::GenerationComplete { step_count: count });
    host.close_session();
}

/// One step's layout + annotation pair, wrapped in a transparent container.
fn build_step(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    registry: &LayoutRegistry,
    opts: &GenerateOpts,
    step: &OnboardingStep,
    index: usize,
    total: usize,
) -> OnboarderResult<NodeId> {
    let layout = if opts.use_library {
        match library::build_from_library(host, &opts.library, step) {
            Ok(Some(instance)) => instance,
            Ok(None) => registry.create_layout(host, ctx, step),
            Err(err) => {
                tracing::warn!(%err, "library instancing failed, using procedural builder");
                registry.create_layout(host, ctx, step)
            }
        }
    } else {
        registry.create_layout(host, ctx, step)
    };

    let annotations = create_annotations(host, ctx, step, index, total)?;

    let container = host.create_frame();
    host.set_name(container, &format!("Step {}: {}", index + 1, step.step_name));
    host.set_auto_layout(container, AutoLayout::vertical(ctx.tokens.spacing.xl));
    host.set_fill(container, None);
    host.append_child(container, layout);
    host.append_child(container, annotations);
    Ok(container)
}

/// Last-resort frame for a step that failed outside the factory boundary.
fn step_error_frame(
    host: &mut dyn SceneHost,
    ctx: &mut GenContext<'_>,
    step: &OnboardingStep,
    index: usize,
    message: &str,
) -> NodeId {
    let frame = host.create_frame();
    host.set_name(frame, &format!("Error - Step {}", index + 1));
    host.resize(frame, Size::new(400.0, 200.0));
    host.set_fill(frame, Some(Rgba::opaque(1.0, 0.95, 0.95)));

    let body = format!("Error generating step: {}\n{message}", step.step_name);
    let text_opts = TextOptions::body()
        .size(ctx.tokens.font_sizes.caption)
        .color(Rgba::opaque(0.8, 0.2, 0.2));
    if let Ok(text) = create_text(host, ctx, &body, text_opts) {
        host.append_child(frame, text);
    }

    frame
}
