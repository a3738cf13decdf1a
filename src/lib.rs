//! Onboarder turns a declarative JSON description of an onboarding flow into
//! a tree of visual nodes inside a host document, paired with an annotation
//! subtree documenting each step's intent.
//!
//! The pipeline is session-oriented:
//!
//! - Validate and normalize a raw flow ([`flow::validate`])
//! - Create a [`GenerateSession`] over a [`SceneHost`]
//! - Hand it the JSON text; one layout + annotation pair is appended per step
//!
//! The host document is a collaborator behind the [`SceneHost`] trait; the
//! crate ships an in-memory reference host for tests and tooling.
#![forbid(unsafe_code)]

pub mod components;
pub mod context;
pub mod flow;
pub mod fonts;
pub mod foundation;
pub mod host;
pub mod layout;
pub mod populate;
pub mod session;
pub mod tokens;

pub use crate::context::GenContext;
pub use crate::flow::model::{
    FieldType, InputField, LayoutType, ModalType, OnboardingFlow, OnboardingStep,
};
pub use crate::flow::validate::{FlowValidation, ValidationMode, validate_flow};
pub use crate::fonts::FontCache;
pub use crate::foundation::core::{Edges, Point, Rgba, Size, Vec2};
pub use crate::foundation::error::{OnboarderError, OnboarderResult};
pub use crate::host::{NodeId, PropertyDef, PropertyKind, SceneHost, UiEvent};
pub use crate::layout::{LayoutBuilder, LayoutRegistry};
pub use crate::session::{GenerateOpts, GenerateReport, GenerateSession, UiRequest};
pub use crate::tokens::{DesignTokens, LibraryKeys};
