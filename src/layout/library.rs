//! Library-instance construction strategy.
//!
//! When the host can import the published component for a layout type, the
//! step is rendered by instantiating it and populating its declared
//! properties instead of building primitives. Any miss (no key, component
//! not importable) returns `None` so the caller degrades to the procedural
//! builder; population itself is best-effort and never fails the step.

use crate::flow::model::OnboardingStep;
use crate::foundation::error::OnboarderResult;
use crate::host::{NodeId, SceneHost};
use crate::populate;
use crate::tokens::LibraryKeys;

/// Instantiate and populate the published component for `step`, or `None`
/// when the library cannot serve this layout type.
pub fn build_from_library(
    host: &mut dyn SceneHost,
    keys: &LibraryKeys,
    step: &OnboardingStep,
) -> OnboarderResult<Option<NodeId>> {
    let Some(key) = keys.component_key(step.layout_type) else {
        return Ok(None);
    };
    let Some(component) = host.import_component(key)? else {
        tracing::debug!(key, layout = step.layout_type.as_str(), "library component unavailable");
        return Ok(None);
    };

    let instance = host.instantiate(component)?;
    host.set_name(instance, &step.step_name);

    // Variant selection is top-level only; the discriminator is the modal
    // sub-type when present.
    if let Some(modal_type) = step.modal_type {
        populate::select_variant(host, instance, modal_type.as_str());
    }

    populate::populate_tree(host, step, instance);
    populate::populate_form_groups(host, instance, step.fields());

    Ok(Some(instance))
}
