use std::collections::BTreeMap;

use onboarder::host::memory::MemoryDocument;
use onboarder::layout::LayoutBuilder;
use onboarder::{
    GenContext, GenerateOpts, GenerateSession, LayoutType, NodeId, OnboarderError,
    OnboarderResult, OnboardingStep, PropertyDef, SceneHost, UiEvent, UiRequest,
};

fn request(json: &str) -> UiRequest {
    UiRequest::GenerateScreens {
        json: json.to_owned(),
    }
}

#[test]
fn single_step_flow_generates_one_subtree_and_closes() {
    let mut doc = MemoryDocument::new();
    let mut session = GenerateSession::new(GenerateOpts::default());

    session.handle(&mut doc, request(include_str!("data/simple_flow.json")));

    // One per-step container, built by the procedural fallback since the
    // memory host has no published components.
    assert_eq!(doc.page().len(), 1);
    let container = doc.page()[0];
    assert_eq!(doc.node_name(container), "Step 1: Intro");

    let pair = doc.children(container);
    assert_eq!(pair.len(), 2);
    assert_eq!(doc.node_name(pair[0]), "Intro");
    assert_eq!(doc.node_name(pair[1]), "Annotations");

    assert_eq!(doc.selection(), doc.page());
    assert_eq!(doc.framed(), doc.page());
    assert_eq!(
        doc.events(),
        &[UiEvent::GenerationComplete { step_count: 1 }]
    );
    let (message, error) = doc.notifications().last().unwrap();
    assert!(!*error);
    assert_eq!(message, "Successfully generated 1 screen");
    assert!(doc.is_closed());
}

#[test]
fn invalid_step_rejects_whole_flow_before_any_node() {
    let mut doc = MemoryDocument::new();
    let mut session = GenerateSession::new(GenerateOpts::default());

    session.handle(
        &mut doc,
        request(r#"{"steps":[{"stepName":"Bad","layoutType":"bogus","headline":"x"}]}"#),
    );

    assert!(doc.page().is_empty());
    assert!(!doc.is_closed());
    let (message, error) = &doc.notifications()[0];
    assert!(*error);
    assert!(message.contains("Step 1"));
    assert!(message.contains("\"bogus\""));
}

struct ExplodingBuilder;

impl LayoutBuilder for ExplodingBuilder {
    fn name(&self) -> &'static str {
        "Exploding Layout"
    }

    fn build(
        &self,
        _host: &mut dyn SceneHost,
        _ctx: &mut GenContext<'_>,
        _step: &OnboardingStep,
    ) -> OnboarderResult<NodeId> {
        Err(OnboarderError::generation("boom"))
    }
}

#[test]
fn builder_failure_still_appends_exactly_one_subtree() {
    let mut doc = MemoryDocument::new();
    let mut session = GenerateSession::new(GenerateOpts::default());
    session
        .registry_mut()
        .register(LayoutType::FullScreen, Box::new(ExplodingBuilder));

    session.handle(&mut doc, request(include_str!("data/simple_flow.json")));

    // The error subtree takes the layout slot; the batch completes and the
    // count includes the failed step.
    assert_eq!(doc.page().len(), 1);
    let container = doc.page()[0];
    let pair = doc.children(container);
    assert_eq!(doc.node_name(pair[0]), "Error: Intro");
    assert_eq!(
        doc.events(),
        &[UiEvent::GenerationComplete { step_count: 1 }]
    );
    assert!(doc.is_closed());
}

#[test]
fn signup_fixture_generates_every_step_in_order() {
    let mut doc = MemoryDocument::new();
    let mut session = GenerateSession::new(GenerateOpts::default());

    let report = session
        .generate(&mut doc, include_str!("data/signup_flow.json"))
        .unwrap();

    assert_eq!(report.step_count, 5);
    assert!(report.errors.is_empty());

    let names: Vec<String> = doc.page().iter().map(|n| doc.node_name(*n)).collect();
    assert_eq!(
        names,
        vec![
            "Step 1: Welcome",
            "Step 2: About You",
            "Step 3: Tour the Sidebar",
            "Step 4: Invite Your Team",
            "Step 5: All Set",
        ]
    );

    // Left-to-right by index: desktop width 1400 + gutter 80.
    for (i, frame) in doc.page().iter().enumerate() {
        assert_eq!(doc.node(*frame).position.x, i as f64 * 1480.0);
        assert_eq!(doc.node(*frame).position.y, 40.0);
    }

    // The annotation stack titles count from one.
    let last = *doc.page().last().unwrap();
    let annotations = doc.children(last)[1];
    let title = doc.children(annotations)[0];
    assert_eq!(doc.characters(title), "Step 5 of 5: All Set");
}

#[test]
fn library_component_is_instanced_when_available() {
    let mut doc = MemoryDocument::new();

    let defs = BTreeMap::from([
        ("headline#44:1".to_owned(), PropertyDef::text()),
        (
            "type".to_owned(),
            PropertyDef::variant(["welcome", "form", "confirmation", "summary"]),
        ),
    ]);
    doc.register_component("1612-2656", "modal-layout", defs, None);

    let mut session = GenerateSession::new(GenerateOpts::default());
    let json = r#"{"steps":[{
        "stepName": "All Set",
        "layoutType": "modal_layout",
        "modalType": "confirmation",
        "headline": "Done"
    }]}"#;
    let report = session.generate(&mut doc, json).unwrap();

    let container = report.frames[0];
    let layout = doc.children(container)[0];
    assert!(doc.is_instance(layout));
    let applied = doc.applied_properties(layout);
    assert_eq!(applied["type"], "confirmation");
    assert_eq!(applied["headline#44:1"], "Done");
}

#[test]
fn library_opt_out_forces_procedural_builders() {
    let mut doc = MemoryDocument::new();
    let defs = BTreeMap::from([("headline#44:1".to_owned(), PropertyDef::text())]);
    doc.register_component("1612-2656", "modal-layout", defs, None);

    let opts = GenerateOpts {
        use_library: false,
        ..GenerateOpts::default()
    };
    let mut session = GenerateSession::new(opts);
    let json = r#"{"steps":[{
        "stepName": "All Set",
        "layoutType": "modal_layout",
        "headline": "Done"
    }]}"#;
    let report = session.generate(&mut doc, json).unwrap();

    let layout = doc.children(report.frames[0])[0];
    assert!(!doc.is_instance(layout));
    assert_eq!(doc.node_name(layout), "All Set - Modal Background");
}
