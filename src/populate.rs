//! Component population: mapping step content onto an instantiated library
//! component.
//!
//! Published property names are only stable up to a human-readable prefix —
//! the library appends an opaque uniqueness token after `#` on publish — so
//! nothing here matches names exactly. The matcher has exactly two rules,
//! applied case-insensitively: the name equals the fragment, or the name
//! begins with the fragment followed by `#`. Anything fuzzier would stop
//! being testable.
//!
//! Every entry point is best-effort: failures surface as diagnostics, never
//! as errors, because partially populated output beats no output.

use std::collections::BTreeMap;

use crate::flow::model::{FieldType, InputField, OnboardingStep};
use crate::host::{NodeId, PropertyKind, SceneHost, find_descendant, find_descendants};

/// Two-rule property-name matcher (see module docs).
pub fn matches_property(name: &str, fragment: &str) -> bool {
    let name = name.to_ascii_lowercase();
    let fragment = fragment.to_ascii_lowercase();
    name == fragment
        || name
            .strip_prefix(&fragment)
            .is_some_and(|rest| rest.starts_with('#'))
}

/// Set the first variant-kind property whose option set contains `value`.
/// No match leaves every variant property untouched.
pub fn select_variant(host: &mut dyn SceneHost, instance: NodeId, value: &str) {
    let defs = host.property_definitions(instance);
    for (name, def) in &defs {
        if def.kind == PropertyKind::Variant && def.variant_options.iter().any(|o| o == value) {
            let update = BTreeMap::from([(name.clone(), value.to_owned())]);
            match host.set_properties(instance, &update) {
                Ok(()) => tracing::debug!(property = %name, value, "variant selected"),
                Err(err) => tracing::warn!(property = %name, %err, "failed to set variant"),
            }
            return;
        }
    }
    tracing::warn!(value, "no variant property accepts the requested value");
}

/// Scalar and repeated-field property pass over one instance.
///
/// At most one property is set per step field; the first matching name wins.
/// All matched values are applied through a single `set_properties` call.
pub fn apply_step_properties(host: &mut dyn SceneHost, step: &OnboardingStep, instance: NodeId) {
    let defs = host.property_definitions(instance);
    if defs.is_empty() {
        return;
    }

    let mut updates = BTreeMap::<String, String>::new();

    // Fixed map from step field to canonical property-name fragment.
    let scalars: [(&str, Option<&str>); 4] = [
        ("headline", step.headline.as_deref()),
        ("subtitle", step.subtitle.as_deref()),
        ("marketingcopy", step.marketing_copy.as_deref()),
        ("cta", step.cta.as_deref()),
    ];
    for (fragment, value) in scalars {
        let Some(value) = value else { continue };
        if let Some(name) = defs.keys().find(|name| matches_property(name, fragment)) {
            updates.insert(name.clone(), value.to_owned());
        }
    }

    for (i, field) in step.fields().iter().enumerate() {
        let Some((label_fragment, placeholder_fragment)) = repeated_fragments(field, i + 1)
        else {
            continue;
        };
        if let Some(name) = defs
            .keys()
            .find(|name| matches_property(name, &label_fragment))
        {
            updates.insert(name.clone(), field.label.clone());
        }
        if let Some(placeholder) = &field.placeholder
            && let Some(name) = defs
                .keys()
                .find(|name| matches_property(name, &placeholder_fragment))
        {
            updates.insert(name.clone(), placeholder.clone());
        }
    }

    if updates.is_empty() {
        tracing::debug!(instance = ?instance, "no matching properties to set");
        return;
    }
    if let Err(err) = host.set_properties(instance, &updates) {
        tracing::warn!(instance = ?instance, %err, "failed to set component properties");
    }
}

/// Expected property-name fragments for the 1-based field index, split by
/// category: select-like fields address `selectLabel-N`, plain text-entry
/// fields address `inputLabel-N`. Other field kinds have no repeated
/// properties.
fn repeated_fragments(field: &InputField, index: usize) -> Option<(String, String)> {
    if field.field_type.is_select_like() {
        return Some((
            format!("selectLabel-{index}"),
            format!("selectPlaceholder-{index}"),
        ));
    }
    matches!(
        field.field_type,
        FieldType::Text | FieldType::Textarea | FieldType::Email | FieldType::Number
    )
    .then(|| {
        (
            format!("inputLabel-{index}"),
            format!("inputPlaceholder-{index}"),
        )
    })
}

/// Scalar pass over the whole subtree: every descendant instance receives
/// [`apply_step_properties`]. Variant selection stays top-level.
pub fn populate_tree(host: &mut dyn SceneHost, step: &OnboardingStep, root: NodeId) {
    if host.is_instance(root) {
        apply_step_properties(host, step, root);
    }
    for child in host.children(root) {
        populate_tree(host, step, child);
    }
}

/// Structural population of pre-built form groups.
///
/// The template exposes one visual group per potential field, named by
/// category prefix. The first `k` groups of each category are assigned to the
/// first `k` fields of that category in document order; unassigned groups are
/// hidden; excess fields are dropped.
pub fn populate_form_groups(host: &mut dyn SceneHost, instance: NodeId, fields: &[InputField]) {
    let Some(container) = find_descendant(host, instance, &|name| name == "form-fields-container")
    else {
        tracing::debug!("no form-fields-container in instance");
        return;
    };

    let input_groups = find_descendants(host, container, &|n| n.starts_with("input-group"));
    let textarea_groups = find_descendants(host, container, &|n| n.starts_with("textArea-group"));
    let dropdown_groups = find_descendants(host, container, &|n| n.starts_with("dropdown-group"));

    let mut input_used = 0;
    let mut textarea_used = 0;
    let mut dropdown_used = 0;

    for field in fields {
        match field.field_type {
            FieldType::Text | FieldType::Email | FieldType::Number
                if input_used < input_groups.len() =>
            {
                assign_group(
                    host,
                    input_groups[input_used],
                    "inputLabel",
                    "inputPlaceholder",
                    field,
                );
                input_used += 1;
            }
            FieldType::Textarea if textarea_used < textarea_groups.len() => {
                assign_group(
                    host,
                    textarea_groups[textarea_used],
                    "textAreaLabel",
                    "textAreaPlaceholder",
                    field,
                );
                textarea_used += 1;
            }
            FieldType::Select | FieldType::Multiselect
                if dropdown_used < dropdown_groups.len() =>
            {
                assign_group(
                    host,
                    dropdown_groups[dropdown_used],
                    "selectLabel",
                    "selectPlaceholder",
                    field,
                );
                dropdown_used += 1;
            }
            _ => {}
        }
    }

    for group in &input_groups[input_used..] {
        host.set_visible(*group, false);
    }
    for group in &textarea_groups[textarea_used..] {
        host.set_visible(*group, false);
    }
    for group in &dropdown_groups[dropdown_used..] {
        host.set_visible(*group, false);
    }
}

fn assign_group(
    host: &mut dyn SceneHost,
    group: NodeId,
    label_name: &str,
    placeholder_name: &str,
    field: &InputField,
) {
    host.set_visible(group, true);
    if let Some(label) = find_descendant(host, group, &|n| n == label_name) {
        host.set_characters(label, &field.label);
    }
    if let Some(placeholder) = find_descendant(host, group, &|n| n == placeholder_name) {
        host.set_characters(placeholder, field.placeholder.as_deref().unwrap_or(""));
    }
}
