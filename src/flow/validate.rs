//! Flow validation and normalization.
//!
//! The raw JSON is tolerated in three envelope shapes and with polymorphic
//! step fields; this module is the only place that looks at raw
//! [`serde_json::Value`]s. Errors are collected across the whole flow rather
//! than failing on the first offender, in `"Step N: <message>"` form, and
//! normalization is idempotent: running an already-normalized step through
//! the validator again is a no-op.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::flow::model::{
    FieldType, InputField, LayoutType, ModalType, OnboardingFlow, OnboardingStep,
};

/// Whether validation errors reject the whole flow or only the offending
/// steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ValidationMode {
    /// Every step must pass; any error rejects the batch.
    #[default]
    Strict,
    /// Proceed with the normalizable steps (those with a `stepName` and a
    /// known `layoutType`) while still surfacing every collected error.
    Lenient,
}

/// Outcome of validating one flow submission.
#[derive(Clone, Debug)]
pub enum FlowValidation {
    /// The flow may be generated. `errors` is non-empty only under
    /// [`ValidationMode::Lenient`].
    Accepted {
        flow: OnboardingFlow,
        errors: Vec<String>,
    },
    /// Nothing may be generated.
    Rejected { errors: Vec<String> },
}

impl FlowValidation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Accepted { errors, .. } | Self::Rejected { errors } => errors,
        }
    }

    pub fn into_flow(self) -> Option<OnboardingFlow> {
        match self {
            Self::Accepted { flow, .. } => Some(flow),
            Self::Rejected { .. } => None,
        }
    }
}

/// Validate and normalize one raw flow submission.
pub fn validate_flow(raw: &Value, mode: ValidationMode) -> FlowValidation {
    let (steps, metadata) = match extract_envelope(raw) {
        Ok(parts) => parts,
        Err(message) => {
            return FlowValidation::Rejected {
                errors: vec![message],
            };
        }
    };

    if steps.is_empty() {
        return FlowValidation::Rejected {
            errors: vec!["Steps array cannot be empty".to_owned()],
        };
    }

    let mut errors = Vec::new();
    let mut normalized = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let prefix = format!("Step {}", i + 1);
        validate_step(step, &prefix, &mut errors);
        // Normalize every step that carries the two load-bearing fields,
        // independent of errors elsewhere in the flow.
        if let Some(step) = normalize_step(step) {
            normalized.push(step);
        }
    }

    if errors.is_empty() {
        return FlowValidation::Accepted {
            flow: OnboardingFlow {
                steps: normalized,
                metadata,
            },
            errors,
        };
    }

    if mode == ValidationMode::Lenient && !normalized.is_empty() {
        tracing::warn!(
            error_count = errors.len(),
            step_count = normalized.len(),
            "lenient validation proceeding despite errors"
        );
        return FlowValidation::Accepted {
            flow: OnboardingFlow {
                steps: normalized,
                metadata,
            },
            errors,
        };
    }

    FlowValidation::Rejected { errors }
}

/// Resolve the three accepted envelope shapes into a steps list plus
/// pass-through metadata. Order matters: an array whose first element carries
/// a `steps` array is the wrapped shape, not a bare step list.
fn extract_envelope(raw: &Value) -> Result<(&[Value], BTreeMap<String, Value>), String> {
    if let Value::Array(items) = raw
        && let Some(Value::Object(first)) = items.first()
        && first.contains_key("steps")
    {
        let steps = as_steps_array(&first["steps"])?;
        return Ok((steps, metadata_without_steps(first)));
    }

    if let Value::Object(map) = raw
        && map.contains_key("steps")
    {
        let steps = as_steps_array(&map["steps"])?;
        return Ok((steps, metadata_without_steps(map)));
    }

    if let Value::Array(items) = raw {
        return Ok((items.as_slice(), BTreeMap::new()));
    }

    Err("JSON must contain a \"steps\" array or be an array of step objects".to_owned())
}

fn as_steps_array(value: &Value) -> Result<&[Value], String> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| "Steps must be an array".to_owned())
}

fn metadata_without_steps(map: &serde_json::Map<String, Value>) -> BTreeMap<String, Value> {
    map.iter()
        .filter(|(k, _)| k.as_str() != "steps")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn non_empty_str<'a>(step: &'a Value, key: &str) -> Option<&'a str> {
    step.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn validate_step(step: &Value, prefix: &str, errors: &mut Vec<String>) {
    if non_empty_str(step, "stepName").is_none() {
        errors.push(format!("{prefix}: stepName is required and must be a string"));
    }

    let layout = match step.get("layoutType").and_then(Value::as_str) {
        None => {
            errors.push(format!(
                "{prefix}: layoutType is required and must be a string"
            ));
            None
        }
        Some(raw_layout) => match LayoutType::parse(raw_layout) {
            Some(layout) => Some(layout),
            None => {
                errors.push(format!(
                    "{prefix}: layoutType \"{raw_layout}\" is not valid. Must be one of: \
                     full_screen, modal_form, modal_layout, split_screen, tooltip_overlay"
                ));
                None
            }
        },
    };

    if let Some(layout) = layout {
        if layout.is_modal()
            && let Some(raw_modal) = step.get("modalType").and_then(Value::as_str)
            && ModalType::parse(raw_modal).is_none()
        {
            errors.push(format!(
                "{prefix}: modalType \"{raw_modal}\" is not valid. Must be one of: \
                 welcome, form, confirmation, summary"
            ));
        }

        validate_content_requirements(step, layout, prefix, errors);
    }

    if let Some(Value::Array(fields)) = step.get("inputFields") {
        for (fi, field) in fields.iter().enumerate() {
            if is_skippable_field(field) {
                continue;
            }
            let field_prefix = format!("{prefix} Input Field {}", fi + 1);
            validate_input_field(field, &field_prefix, errors);
        }
    }
}

fn validate_content_requirements(
    step: &Value,
    layout: LayoutType,
    prefix: &str,
    errors: &mut Vec<String>,
) {
    let headline = non_empty_str(step, "headline").is_some();
    let subtitle = non_empty_str(step, "subtitle").is_some();
    let marketing = non_empty_str(step, "marketingCopy").is_some();

    match layout {
        LayoutType::FullScreen => {
            if !headline && !subtitle {
                errors.push(format!(
                    "{prefix}: Full screen layout requires at least a headline or subtitle"
                ));
            }
        }
        LayoutType::ModalForm | LayoutType::ModalLayout => {
            if !headline && !subtitle {
                errors.push(format!(
                    "{prefix}: Modal layout requires at least a headline or subtitle"
                ));
            }
        }
        LayoutType::SplitScreen => {
            if !headline && !subtitle && !marketing {
                errors.push(format!(
                    "{prefix}: Split screen layout requires at least headline, subtitle, \
                     or marketing copy"
                ));
            }
        }
        LayoutType::TooltipOverlay => {
            if !headline && !subtitle {
                errors.push(format!(
                    "{prefix}: Tooltip layout requires at least a headline or subtitle"
                ));
            }
        }
    }
}

/// Empty entries are tolerated without complaint: `null`, `{}`, and the empty
/// string all mean "no field here".
fn is_skippable_field(field: &Value) -> bool {
    match field {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn validate_input_field(field: &Value, prefix: &str, errors: &mut Vec<String>) {
    // Bare strings are valid as-is; normalization expands them later.
    if field.is_string() {
        return;
    }

    if non_empty_str(field, "label").is_none() {
        errors.push(format!("{prefix}: label is required and must be a string"));
    }

    match field.get("type").and_then(Value::as_str) {
        None => errors.push(format!("{prefix}: type is required and must be a string")),
        Some(raw_type) => {
            if FieldType::parse(raw_type).is_none() {
                errors.push(format!("{prefix}: type \"{raw_type}\" is not valid"));
            }
        }
    }
}

/// Normalize one raw step, or `None` when it lacks a usable `stepName` /
/// `layoutType` pair.
fn normalize_step(step: &Value) -> Option<OnboardingStep> {
    let step_name = non_empty_str(step, "stepName")?;
    let layout_type = step
        .get("layoutType")
        .and_then(Value::as_str)
        .and_then(LayoutType::parse)?;

    let mut normalized = OnboardingStep::new(step_name, layout_type);
    normalized.headline = opt_string(step, "headline");
    normalized.subtitle = opt_string(step, "subtitle");
    normalized.marketing_copy = opt_string(step, "marketingCopy");
    normalized.cta = opt_string(step, "cta");
    normalized.cta_type = opt_string(step, "ctaType");
    normalized.modal_type = step
        .get("modalType")
        .and_then(Value::as_str)
        .and_then(ModalType::parse);
    normalized.input_fields = normalize_fields(step.get("inputFields"));
    normalized.ux_goal = opt_string(step, "uxGoal");
    normalized.user_action = opt_string(step, "userAction");
    normalized.rationale = opt_string(step, "rationale");
    normalized.flow_end = step.get("flowEnd").and_then(Value::as_bool).unwrap_or(false);
    Some(normalized)
}

fn opt_string(step: &Value, key: &str) -> Option<String> {
    non_empty_str(step, key).map(str::to_owned)
}

/// Bare strings become text fields; invalid entries are dropped; an emptied
/// list becomes `None`.
fn normalize_fields(raw: Option<&Value>) -> Option<Vec<InputField>> {
    let items = raw?.as_array()?;
    let fields: Vec<InputField> = items.iter().filter_map(normalize_field).collect();
    (!fields.is_empty()).then_some(fields)
}

fn normalize_field(field: &Value) -> Option<InputField> {
    if let Value::String(label) = field {
        return (!label.is_empty()).then(|| InputField::from_label(label.clone()));
    }

    let label = non_empty_str(field, "label")?;
    let field_type = field
        .get("type")
        .and_then(Value::as_str)
        .and_then(FieldType::parse)?;

    Some(InputField {
        label: label.to_owned(),
        field_type,
        required: field.get("required").and_then(Value::as_bool).unwrap_or(false),
        placeholder: opt_string(field, "placeholder"),
        options: field.get("options").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        }),
        validation: opt_string(field, "validation"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accepted(raw: Value) -> OnboardingFlow {
        match validate_flow(&raw, ValidationMode::Strict) {
            FlowValidation::Accepted { flow, errors } => {
                assert!(errors.is_empty());
                flow
            }
            FlowValidation::Rejected { errors } => panic!("rejected: {errors:?}"),
        }
    }

    fn rejected(raw: Value) -> Vec<String> {
        match validate_flow(&raw, ValidationMode::Strict) {
            FlowValidation::Rejected { errors } => errors,
            FlowValidation::Accepted { .. } => panic!("unexpectedly accepted"),
        }
    }

    fn intro_step() -> Value {
        json!({
            "stepName": "Intro",
            "layoutType": "full_screen",
            "headline": "Welcome"
        })
    }

    #[test]
    fn three_envelopes_normalize_identically() {
        let from_object = accepted(json!({ "steps": [intro_step()] }));
        let from_wrapped = accepted(json!([{ "steps": [intro_step()] }]));
        let from_bare = accepted(json!([intro_step()]));
        assert_eq!(from_object.steps, from_wrapped.steps);
        assert_eq!(from_wrapped.steps, from_bare.steps);
    }

    #[test]
    fn envelope_metadata_passes_through() {
        let flow = accepted(json!({
            "steps": [intro_step()],
            "flowName": "Signup",
            "version": 3
        }));
        assert_eq!(flow.metadata["flowName"], "Signup");
        assert_eq!(flow.metadata["version"], 3);
        assert!(!flow.metadata.contains_key("steps"));
    }

    #[test]
    fn rejects_unusable_envelope() {
        let errors = rejected(json!("not a flow"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("steps"));
    }

    #[test]
    fn rejects_non_array_steps() {
        let errors = rejected(json!({ "steps": "oops" }));
        assert_eq!(errors, vec!["Steps must be an array".to_owned()]);
    }

    #[test]
    fn rejects_empty_steps() {
        let errors = rejected(json!({ "steps": [] }));
        assert_eq!(errors, vec!["Steps array cannot be empty".to_owned()]);
    }

    #[test]
    fn rejects_unknown_layout_type_naming_step_and_value() {
        let errors = rejected(json!({
            "steps": [{ "stepName": "Intro", "layoutType": "bogus", "headline": "Hi" }]
        }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Step 1:"));
        assert!(errors[0].contains("\"bogus\""));
    }

    #[test]
    fn requires_content_per_layout() {
        let errors = rejected(json!({
            "steps": [
                { "stepName": "A", "layoutType": "full_screen" },
                { "stepName": "B", "layoutType": "split_screen" },
                { "stepName": "C", "layoutType": "modal_layout" },
                { "stepName": "D", "layoutType": "tooltip_overlay" }
            ]
        }));
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("headline or subtitle"));
        assert!(errors[1].contains("marketing copy"));
    }

    #[test]
    fn split_screen_accepts_marketing_copy_alone() {
        let flow = accepted(json!({
            "steps": [{ "stepName": "S", "layoutType": "split_screen", "marketingCopy": "Why" }]
        }));
        assert_eq!(flow.steps[0].marketing_copy.as_deref(), Some("Why"));
    }

    #[test]
    fn modal_type_must_be_known_on_modal_layouts() {
        let errors = rejected(json!({
            "steps": [{
                "stepName": "M",
                "layoutType": "modal_form",
                "headline": "Hi",
                "modalType": "wizard"
            }]
        }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("modalType \"wizard\""));
    }

    #[test]
    fn bare_string_field_normalizes_to_text() {
        let flow = accepted(json!({
            "steps": [{
                "stepName": "Form",
                "layoutType": "modal_form",
                "headline": "Hi",
                "inputFields": ["Email"]
            }]
        }));
        let fields = flow.steps[0].fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0], InputField::from_label("Email"));
    }

    #[test]
    fn empty_field_entries_are_skipped_not_errors() {
        let flow = accepted(json!({
            "steps": [{
                "stepName": "Form",
                "layoutType": "modal_form",
                "headline": "Hi",
                "inputFields": [null, {}, "", "Name"]
            }]
        }));
        let fields = flow.steps[0].fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Name");
    }

    #[test]
    fn object_fields_need_label_and_valid_type() {
        let errors = rejected(json!({
            "steps": [{
                "stepName": "Form",
                "layoutType": "modal_form",
                "headline": "Hi",
                "inputFields": [
                    { "type": "text" },
                    { "label": "Age", "type": "slider" }
                ]
            }]
        }));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Step 1 Input Field 1: label is required"));
        assert!(errors[1].contains("type \"slider\" is not valid"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let flow = accepted(json!({
            "steps": [{
                "stepName": "Form",
                "layoutType": "modal_form",
                "headline": "Hi",
                "modalType": "form",
                "inputFields": ["Email", { "label": "Role", "type": "select",
                                            "options": ["Eng", "Design"] }],
                "flowEnd": true
            }]
        }));
        let round_tripped = serde_json::to_value(&flow.steps).unwrap();
        let again = accepted(json!({ "steps": round_tripped }));
        assert_eq!(flow.steps, again.steps);
    }

    #[test]
    fn strict_rejects_when_any_step_fails() {
        let errors = rejected(json!({
            "steps": [intro_step(), { "stepName": "Bad", "layoutType": "nope" }]
        }));
        assert!(!errors.is_empty());
    }

    #[test]
    fn lenient_proceeds_with_normalizable_steps() {
        let raw = json!({
            "steps": [intro_step(), { "stepName": "Bad", "layoutType": "nope" }]
        });
        match validate_flow(&raw, ValidationMode::Lenient) {
            FlowValidation::Accepted { flow, errors } => {
                assert_eq!(flow.steps.len(), 1);
                assert_eq!(flow.steps[0].step_name, "Intro");
                assert!(!errors.is_empty());
            }
            FlowValidation::Rejected { errors } => panic!("rejected: {errors:?}"),
        }
    }

    #[test]
    fn lenient_still_rejects_when_nothing_is_normalizable() {
        let raw = json!({ "steps": [{ "layoutType": "nope" }] });
        assert!(!validate_flow(&raw, ValidationMode::Lenient).is_accepted());
    }

    #[test]
    fn flow_end_defaults_false() {
        let flow = accepted(json!({ "steps": [intro_step()] }));
        assert!(!flow.steps[0].flow_end);
    }
}
