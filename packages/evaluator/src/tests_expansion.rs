/// Placeholder expansion tests: detection, generated shapes, determinism
use serde_json::json;

use pagecraft_template::{Context, Node, Template, TemplateKind};

use crate::expand::{detect, expand, ExpansionShape};
use crate::processor::TreeProcessor;

fn feature_context() -> Context {
    Context::new()
        .with_content("features", json!(["Dishwasher safe", "Hand glazed", "Gift boxed"]))
        .with_content(
            "featureExplanations",
            json!({
                "Dishwasher safe": "Survives the top rack.",
                "Hand glazed": "   ",
            }),
        )
}

#[test]
fn test_detect_classifies_sentinels_and_mappings() {
    assert_eq!(detect("SPECIALTIES_PLACEHOLDER"), Some(ExpansionShape::Specialties));
    assert_eq!(
        detect("  ACHIEVEMENTS_PLACEHOLDER\n"),
        Some(ExpansionShape::Achievements)
    );
    assert_eq!(
        detect("{{content.features.map(f => f)}}"),
        Some(ExpansionShape::FeatureList)
    );
    assert_eq!(
        detect("{{content.specifications.map(([k, v]) => k)}}"),
        Some(ExpansionShape::SpecEntries)
    );
    assert_eq!(
        detect("{{content.reviews.map(r => r.text)}}"),
        Some(ExpansionShape::UnknownMapping)
    );
    assert_eq!(detect("{{content.title}}"), None);
    assert_eq!(detect("plain text"), None);
}

#[test]
fn test_feature_expansion_builds_titled_blocks() {
    let parent = Node::new("features", "div");
    let out = expand(
        ExpansionShape::FeatureList,
        &parent,
        &feature_context(),
        TemplateKind::Modern,
    );

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].id, "feature-0");
    assert_eq!(out[0].kind, "div");
    assert_eq!(out[0].prop_text("className"), Some("feature-item"));

    let children = out[0].child_nodes();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id, "feature-0-title");
    assert_eq!(children[0].kind, "h4");
    assert_eq!(children[0].text_content(), Some("Dishwasher safe"));
    assert_eq!(children[1].id, "feature-0-desc");
    assert_eq!(children[1].kind, "p");
    assert_eq!(children[1].text_content(), Some("Survives the top rack."));
}

#[test]
fn test_blank_or_missing_explanations_are_skipped() {
    let parent = Node::new("features", "div");
    let out = expand(
        ExpansionShape::FeatureList,
        &parent,
        &feature_context(),
        TemplateKind::Modern,
    );

    // "Hand glazed" has a whitespace-only explanation, "Gift boxed" none
    assert_eq!(out[1].child_nodes().len(), 1);
    assert_eq!(out[2].child_nodes().len(), 1);
}

#[test]
fn test_feature_expansion_skips_non_string_items() {
    let ctx = Context::new().with_content("features", json!(["First", 7, null, "Second"]));
    let parent = Node::new("features", "div");
    let out = expand(ExpansionShape::FeatureList, &parent, &ctx, TemplateKind::Modern);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, "feature-0");
    assert_eq!(out[1].id, "feature-1");
    assert_eq!(
        out[1].child_nodes()[0].text_content(),
        Some("Second")
    );
}

#[test]
fn test_specifications_inside_tbody_become_table_rows() {
    let ctx = Context::new().with_content(
        "specifications",
        json!({ "Material": "Stoneware", "Capacity": 350 }),
    );
    let parent = Node::new("spec-body", "tbody");
    let out = expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern);

    assert_eq!(out.len(), 2);
    // entries come out sorted by key
    assert_eq!(out[0].id, "spec-row-0");
    assert_eq!(out[0].kind, "tr");
    let cells = out[0].child_nodes();
    assert_eq!(cells[0].kind, "td");
    assert_eq!(cells[0].id, "spec-row-0-key");
    assert_eq!(cells[0].text_content(), Some("Capacity"));
    assert_eq!(cells[1].id, "spec-row-0-value");
    assert_eq!(cells[1].text_content(), Some("350"));
    assert_eq!(out[1].child_nodes()[0].text_content(), Some("Material"));
}

#[test]
fn test_specifications_outside_tbody_become_block_rows() {
    let ctx = Context::new().with_content("specifications", json!({ "Material": "Stoneware" }));
    let parent = Node::new("spec-list", "div");
    let out = expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern);

    assert_eq!(out[0].kind, "div");
    assert_eq!(out[0].prop_text("className"), Some("spec-row"));
    let cells = out[0].child_nodes();
    assert_eq!(cells[0].kind, "span");
    assert_eq!(cells[0].prop_text("className"), Some("spec-key"));
    assert_eq!(cells[1].prop_text("className"), Some("spec-value"));
}

#[test]
fn test_specialty_styles_per_template_kind() {
    let ctx = Context::new().with_content("specialties", json!(["Quality"]));
    let parent = Node::new("list", "div");

    let modern = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Modern);
    assert_eq!(modern[0].kind, "span");
    assert_eq!(modern[0].prop_text("className"), Some("pill pill--modern"));
    assert_eq!(modern[0].text_content(), Some("Quality"));

    let classic = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Classic);
    assert_eq!(classic[0].kind, "li");
    assert_eq!(
        classic[0].prop_text("className"),
        Some("list-entry list-entry--classic")
    );
    assert_eq!(classic[0].text_content(), Some("\u{2022} Quality"));

    let minimal = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Minimal);
    assert_eq!(minimal[0].kind, "p");
    assert_eq!(
        minimal[0].prop_text("className"),
        Some("list-line list-line--minimal")
    );

    let bold = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Bold);
    assert_eq!(bold[0].kind, "span");
    assert_eq!(bold[0].prop_text("className"), Some("badge badge--bold"));
}

#[test]
fn test_generated_items_are_editable() {
    let ctx = Context::new().with_content("achievements", json!(["Top seller"]));
    let parent = Node::new("list", "div");
    let out = expand(ExpansionShape::Achievements, &parent, &ctx, TemplateKind::Modern);

    assert_eq!(out[0].id, "achievement-0");
    assert!(out[0].editable.as_ref().unwrap().content_editable);
}

#[test]
fn test_blank_entries_filtered_before_numbering() {
    let ctx = Context::new().with_content("specialties", json!(["First", "   ", "", "Second"]));
    let parent = Node::new("list", "div");
    let out = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Modern);

    // ids stay dense after the blanks drop out
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, "specialty-0");
    assert_eq!(out[0].text_content(), Some("First"));
    assert_eq!(out[1].id, "specialty-1");
    assert_eq!(out[1].text_content(), Some("Second"));
}

#[test]
fn test_item_text_is_kept_verbatim() {
    let ctx = Context::new().with_content("specialties", json!(["  spaced out  "]));
    let parent = Node::new("list", "div");
    let out = expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Modern);

    assert_eq!(out[0].text_content(), Some("  spaced out  "));
}

#[test]
fn test_unknown_mapping_and_missing_collections_expand_to_nothing() {
    let parent = Node::new("list", "div");
    let ctx = Context::new();

    assert!(expand(ExpansionShape::UnknownMapping, &parent, &ctx, TemplateKind::Modern).is_empty());
    assert!(expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Modern).is_empty());
    assert!(expand(ExpansionShape::FeatureList, &parent, &ctx, TemplateKind::Modern).is_empty());
    assert!(expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern).is_empty());
}

#[test]
fn test_wrong_typed_collections_expand_to_nothing() {
    let parent = Node::new("list", "div");
    let ctx = Context::new()
        .with_content("specifications", json!(["not", "a", "map"]))
        .with_content("specialties", json!({ "not": "an array" }));

    assert!(expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern).is_empty());
    assert!(expand(ExpansionShape::Specialties, &parent, &ctx, TemplateKind::Modern).is_empty());
}

#[test]
fn test_expansion_is_deterministic() {
    let ctx = Context::new().with_content(
        "specifications",
        json!({ "Weight": "400g", "Material": "Stoneware", "Capacity": "350ml" }),
    );
    let parent = Node::new("spec-body", "tbody");

    let first = expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern);
    let second = expand(ExpansionShape::SpecEntries, &parent, &ctx, TemplateKind::Modern);
    assert_eq!(first, second);

    let keys: Vec<_> = first
        .iter()
        .map(|row| row.child_nodes()[0].text_content().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["Capacity", "Material", "Weight"]);
}

#[test]
fn test_sentinels_never_survive_processing() {
    let ctx = Context::new()
        .with_content("specialties", json!(["Quality"]))
        .with_content("achievements", json!(["Top seller"]))
        .with_content("features", json!(["Fast"]))
        .with_content("specifications", json!({ "Material": "Clay" }));
    let template = Template::new(
        "Shop",
        Node::new("root", "div")
            .with_child(Node::new("specialties", "div").with_text("SPECIALTIES_PLACEHOLDER"))
            .with_child(Node::new("achievements", "ul").with_text("ACHIEVEMENTS_PLACEHOLDER"))
            .with_child(Node::new("features", "div").with_text("{{content.features.map(f => f)}}"))
            .with_child(
                Node::new("table", "table").with_child(
                    Node::new("spec-body", "tbody")
                        .with_text("{{content.specifications.map(([k, v]) => k)}}"),
                ),
            ),
    );

    let out = TreeProcessor::new(TemplateKind::Modern)
        .process_template(&template, &ctx)
        .unwrap()
        .unwrap();
    let json = serde_json::to_string(&*out).unwrap();
    assert!(!json.contains("PLACEHOLDER"));
    assert!(!json.contains(".map("));
    assert!(out.find_by_id("specialty-0").is_some());
    assert!(out.find_by_id("achievement-0").is_some());
    assert!(out.find_by_id("feature-0").is_some());
    assert!(out.find_by_id("spec-row-0").is_some());
}

#[test]
fn test_table_and_block_parents_from_one_collection() {
    let ctx = Context::new().with_content("specifications", json!({ "Material": "Clay" }));
    let template = Template::new(
        "Shop",
        Node::new("root", "div")
            .with_child(
                Node::new("table", "table").with_child(
                    Node::new("in-table", "tbody")
                        .with_text("{{content.specifications.map(([k, v]) => k)}}"),
                ),
            )
            .with_child(
                Node::new("in-flow", "div")
                    .with_text("{{content.specifications.map(([k, v]) => k)}}"),
            ),
    );

    let out = TreeProcessor::new(TemplateKind::Modern)
        .process_template(&template, &ctx)
        .unwrap()
        .unwrap();

    let table_row = &out.find_by_id("in-table").unwrap().child_nodes()[0];
    assert_eq!(table_row.kind, "tr");
    let block_row = &out.find_by_id("in-flow").unwrap().child_nodes()[0];
    assert_eq!(block_row.kind, "div");
}
