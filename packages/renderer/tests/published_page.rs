use pamphlet_renderer::*;
use pamphlet_schema::*;

fn invitation() -> Project {
    Project {
        id: "1716000000000".to_string(),
        title: "개관 <행사>".to_string(),
        template: TemplateType::Invitation,
        password: Some("secret".to_string()),
        blocks: initial_blocks(TemplateType::Invitation),
        created_at: 1_716_000_000_000,
        theme_color: DEFAULT_THEME_COLOR.to_string(),
    }
}

#[test]
fn test_document_keeps_block_order() {
    let project = invitation();
    let doc = render_document(&project, RenderMode::ReadOnly);

    let keys: Vec<_> = doc
        .nodes
        .iter()
        .filter_map(|n| n.attr("data-block-id"))
        .collect();
    assert_eq!(keys, project.block_ids());
}

#[test]
fn test_published_page_shell() {
    let html = render_published_page(&invitation(), &PageOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("name=\"viewport\""));
    assert!(html.contains("<title>개관 &lt;행사&gt;</title>"));
    assert!(html.contains("max-width:480px"));
    assert!(html.contains("Powered by Pamphlet"));
    assert!(!html.contains("secret"));
}

#[test]
fn test_published_form_is_fillable() {
    let html = render_published_page(&invitation(), &PageOptions::default());
    assert!(html.contains("placeholder=\"성함 입력\""));
    assert!(!html.contains(" disabled"));
}

#[test]
fn test_editor_canvas_disables_form() {
    let doc = render_document(&invitation(), RenderMode::Edit);
    let fragment = compile_to_html(&doc, CompileOptions::compact());
    assert!(fragment.contains("<input disabled"));
    assert!(fragment.contains("2024-05-20 14:00 ~ 2024-05-20 17:00"));
}

#[test]
fn test_unknown_block_does_not_break_page() {
    let mut project = invitation();
    project.blocks.insert(
        1,
        Block::new(
            "mystery",
            BlockContent::Unknown {
                type_name: "CAROUSEL".to_string(),
                raw: serde_json::json!({ "slides": [] }),
            },
            BlockStyle::default(),
        ),
    );

    let html = render_published_page(&project, &PageOptions::default());
    assert!(html.contains(UNKNOWN_BLOCK_NOTICE));
    assert!(html.contains("서울시 강남구"));
}
