//! Normalized onboarding-flow model.
//!
//! The raw input is polymorphic (three envelope shapes, string-or-object
//! fields); everything downstream of [`crate::flow::validate`] consumes only
//! these types. Serialization reproduces the wire naming, so a normalized
//! step round-trips through the validator unchanged.

use std::collections::BTreeMap;

/// Structural template used to arrange one step's visual content.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    FullScreen,
    ModalForm,
    ModalLayout,
    SplitScreen,
    TooltipOverlay,
}

impl LayoutType {
    pub const ALL: [LayoutType; 5] = [
        LayoutType::FullScreen,
        LayoutType::ModalForm,
        LayoutType::ModalLayout,
        LayoutType::SplitScreen,
        LayoutType::TooltipOverlay,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full_screen" => Some(Self::FullScreen),
            "modal_form" => Some(Self::ModalForm),
            "modal_layout" => Some(Self::ModalLayout),
            "split_screen" => Some(Self::SplitScreen),
            "tooltip_overlay" => Some(Self::TooltipOverlay),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullScreen => "full_screen",
            Self::ModalForm => "modal_form",
            Self::ModalLayout => "modal_layout",
            Self::SplitScreen => "split_screen",
            Self::TooltipOverlay => "tooltip_overlay",
        }
    }

    pub fn is_modal(self) -> bool {
        matches!(self, Self::ModalForm | Self::ModalLayout)
    }
}

/// Sub-arrangement of a modal card's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalType {
    Welcome,
    Form,
    Confirmation,
    Summary,
}

impl ModalType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "welcome" => Some(Self::Welcome),
            "form" => Some(Self::Form),
            "confirmation" => Some(Self::Confirmation),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Form => "form",
            Self::Confirmation => "confirmation",
            Self::Summary => "summary",
        }
    }
}

/// Input widget kind of a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Select,
    Multiselect,
    Checkbox,
    Radio,
    Textarea,
    Date,
}

impl FieldType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "email" => Some(Self::Email),
            "number" => Some(Self::Number),
            "select" => Some(Self::Select),
            "multiselect" => Some(Self::Multiselect),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "textarea" => Some(Self::Textarea),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::Date => "date",
        }
    }

    /// Select-like fields populate `selectLabel-N` style properties and
    /// consume dropdown groups; everything else in the plain bucket.
    pub fn is_select_like(self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }
}

/// One normalized form field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}

impl InputField {
    /// The normalized form of a bare-string field.
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_type: FieldType::Text,
            required: false,
            placeholder: None,
            options: None,
            validation: None,
        }
    }
}

/// One normalized onboarding step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStep {
    pub step_name: String,
    pub layout_type: LayoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_copy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_type: Option<ModalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_fields: Option<Vec<InputField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ux_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default)]
    pub flow_end: bool,
}

impl OnboardingStep {
    /// Minimal step with only the required fields set.
    pub fn new(step_name: impl Into<String>, layout_type: LayoutType) -> Self {
        Self {
            step_name: step_name.into(),
            layout_type,
            headline: None,
            subtitle: None,
            marketing_copy: None,
            cta: None,
            cta_type: None,
            modal_type: None,
            input_fields: None,
            ux_goal: None,
            user_action: None,
            rationale: None,
            flow_end: false,
        }
    }

    pub fn fields(&self) -> &[InputField] {
        self.input_fields.as_deref().unwrap_or(&[])
    }

    pub fn has_fields(&self) -> bool {
        !self.fields().is_empty()
    }
}

/// The full validated flow: ordered steps plus envelope metadata passed
/// through untouched. Non-empty by construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OnboardingFlow {
    pub steps: Vec<OnboardingStep>,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}
