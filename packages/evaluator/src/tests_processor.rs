/// Tree processing tests: gates, interpolation, pruning, idempotence
use serde_json::json;

use pagecraft_template::{Children, Context, Node, PropValue, Template, TemplateKind};

use crate::processor::{RenderError, TreeProcessor};

fn processor() -> TreeProcessor {
    TreeProcessor::new(TemplateKind::Modern)
}

#[test]
fn test_text_children_interpolate() {
    let ctx = Context::new().with_content("title", json!("Handmade Mugs"));
    let node = Node::new("title", "h1").with_text("{{content.title}}");

    let out = processor().process_node(&node, &ctx).unwrap();
    assert_eq!(out.text_content(), Some("Handmade Mugs"));
}

#[test]
fn test_mixed_text_keeps_surroundings() {
    let ctx = Context::new().with_content("price", json!(25));
    let node = Node::new("price", "p").with_text("Price: {{content.price}} USD");

    let out = processor().process_node(&node, &ctx).unwrap();
    assert_eq!(out.text_content(), Some("Price: 25 USD"));
}

#[test]
fn test_prop_values_interpolate() {
    let ctx = Context::new().with_content("slug", json!("mugs"));
    let node = Node::new("link", "a")
        .with_prop("href", "/shop/{{content.slug}}")
        .with_prop("className", "plain");

    let out = processor().process_node(&node, &ctx).unwrap();
    assert_eq!(out.prop_text("href"), Some("/shop/mugs"));
    assert_eq!(out.prop_text("className"), Some("plain"));
}

#[test]
fn test_bool_props_pass_through() {
    let ctx = Context::new();
    let node = Node::new("field", "input").with_prop("disabled", true);

    let out = processor().process_node(&node, &ctx).unwrap();
    assert_eq!(out.props.get("disabled"), Some(&PropValue::Bool(true)));
}

#[test]
fn test_missing_root_is_an_error() {
    let template = Template::default();
    let result = processor().process_template(&template, &Context::new());
    assert_eq!(result, Err(RenderError::MissingRoot));
}

#[test]
fn test_root_pruned_by_own_gate_is_empty_page() {
    let template = Template::new("Shop", Node::new("root", "div").with_if("content.missing"));
    let result = processor().process_template(&template, &Context::new());
    assert_eq!(result, Ok(None));
}

#[test]
fn test_if_gate_prunes_whole_subtree() {
    let ctx = Context::new();
    let root = Node::new("root", "div")
        .with_child(
            Node::new("gated", "section")
                .with_if("content.missing")
                .with_child(Node::new("inner", "p").with_text("hidden")),
        )
        .with_child(Node::new("always", "p").with_text("visible"));

    let out = processor().process_node(&root, &ctx).unwrap();
    assert!(out.find_by_id("gated").is_none());
    assert!(out.find_by_id("inner").is_none());
    assert!(out.find_by_id("always").is_some());
}

#[test]
fn test_unless_gate_inverts() {
    let ctx = Context::new().with_content("sold_out", json!(true));
    let root = Node::new("root", "div")
        .with_child(Node::new("buy", "button").with_unless("content.sold_out"))
        .with_child(Node::new("notice", "p").with_if("content.sold_out"));

    let out = processor().process_node(&root, &ctx).unwrap();
    assert!(out.find_by_id("buy").is_none());
    assert!(out.find_by_id("notice").is_some());
}

#[test]
fn test_show_gate() {
    let ctx = Context::new().with_state("expanded", json!(false));
    let node = Node::new("details", "div").with_show("state.expanded");
    assert!(processor().process_node(&node, &ctx).is_none());

    let ctx = Context::new().with_state("expanded", json!(true));
    let node = Node::new("details", "div").with_show("state.expanded");
    assert!(processor().process_node(&node, &ctx).is_some());
}

#[test]
fn test_length_guard_gate_on_empty_and_nonempty_lists() {
    let root = Node::new("root", "div").with_child(
        Node::new("reviews", "section").with_if("content.reviews.length > 0"),
    );

    let empty = Context::new().with_content("reviews", json!([]));
    let out = processor().process_node(&root, &empty).unwrap();
    assert!(out.find_by_id("reviews").is_none());

    let one = Context::new().with_content("reviews", json!(["Great mug"]));
    let out = processor().process_node(&root, &one).unwrap();
    assert!(out.find_by_id("reviews").is_some());
}

#[test]
fn test_pruned_single_child_clears_the_slot() {
    let ctx = Context::new();
    let root = Node::new("root", "div")
        .with_child(Node::new("only", "p").with_if("content.missing"));

    let out = processor().process_node(&root, &ctx).unwrap();
    assert!(out.children.is_none());
}

#[test]
fn test_pruned_list_children_are_dropped_in_place() {
    let ctx = Context::new().with_content("b", json!("keep"));
    let root = Node::new("root", "div")
        .with_child(Node::new("a", "p").with_if("content.missing"))
        .with_child(Node::new("b", "p").with_if("content.b"))
        .with_child(Node::new("c", "p").with_if("content.missing"));

    let out = processor().process_node(&root, &ctx).unwrap();
    match &out.children {
        Some(Children::Many(nodes)) => {
            assert_eq!(nodes.len(), 1);
            assert_eq!(nodes[0].id, "b");
        }
        other => panic!("expected node list, got {:?}", other),
    }
}

#[test]
fn test_source_tree_is_never_mutated() {
    let ctx = Context::new().with_content("title", json!("Mug"));
    let template = Template::new(
        "Shop",
        Node::new("root", "div").with_child(Node::new("t", "h1").with_text("{{content.title}}")),
    );

    let out = processor().process_template(&template, &ctx).unwrap().unwrap();
    assert_eq!(out.find_by_id("t").unwrap().text_content(), Some("Mug"));
    // the source still holds the unexpanded expression
    assert_eq!(
        template.find_by_id("t").unwrap().text_content(),
        Some("{{content.title}}")
    );
}

#[test]
fn test_gates_survive_into_the_processed_tree() {
    let ctx = Context::new().with_content("flag", json!(true));
    let node = Node::new("gated", "div").with_if("content.flag");

    let out = processor().process_node(&node, &ctx).unwrap();
    assert_eq!(out.if_expr.as_deref(), Some("content.flag"));
}

#[test]
fn test_reprocessing_own_output_is_identity() {
    let ctx = Context::new()
        .with_content("title", json!("Handmade Mugs"))
        .with_content("price", json!(25))
        .with_content("specialties", json!(["Quality", "Speed"]));
    let template = Template::new(
        "Shop",
        Node::new("root", "div")
            .with_prop("data-price", "{{content.price}}")
            .with_child(Node::new("title", "h1").with_text("{{content.title}}"))
            .with_child(Node::new("gone", "p").with_if("content.missing"))
            .with_child(Node::new("specialties", "div").with_text("SPECIALTIES_PLACEHOLDER")),
    );

    let first = processor().process_template(&template, &ctx).unwrap().unwrap();
    let again = Template {
        metadata: template.metadata.clone(),
        component: Some(first.clone()),
    };
    let second = processor().process_template(&again, &ctx).unwrap().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_template_kind_read_from_metadata() {
    let mut template = Template::new(
        "Anything",
        Node::new("root", "div").with_text("SPECIALTIES_PLACEHOLDER"),
    );
    template.metadata.template_type = Some("classic".to_string());
    let ctx = Context::new().with_content("specialties", json!(["Quality"]));

    let out = TreeProcessor::for_template(&template)
        .process_template(&template, &ctx)
        .unwrap()
        .unwrap();
    let item = out.find_by_id("specialty-0").unwrap();
    assert_eq!(item.kind, "li");
    assert_eq!(item.text_content(), Some("\u{2022} Quality"));
}
