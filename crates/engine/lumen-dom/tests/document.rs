//! Integration tests - document structure, queries and focus
//!
//! Exercises the public document API the way the accessibility layer
//! uses it.

use lumen_dom::{Document, DomError, DomEventType, NodeId};

fn append(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let id = doc.create_element(tag);
    doc.append_child(parent, id).unwrap();
    id
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_document_skeleton() {
    let doc = Document::new("https://example.com/");
    assert_eq!(doc.url(), "https://example.com/");
    assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
    assert_eq!(doc.tree().parent(doc.head()), Some(doc.document_element()));
    assert_eq!(doc.element(doc.body()).map(|e| e.tag.as_str()), Some("body"));
}

#[test]
fn test_hierarchy_errors() {
    let mut doc = Document::default();
    let body = doc.body();
    let outer = append(&mut doc, body, "div");
    let inner = append(&mut doc, outer, "div");

    assert!(matches!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(doc.append_child(body, NodeId::NONE).is_err());
}

#[test]
fn test_remove_detaches_subtree() {
    let mut doc = Document::default();
    let body = doc.body();
    let section = append(&mut doc, body, "section");
    let button = append(&mut doc, section, "button");

    doc.remove(section).unwrap();
    assert!(!doc.is_connected(section));
    assert!(!doc.is_connected(button));
    assert!(doc.query_selector("button").is_none());
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_queries() {
    let mut doc = Document::default();
    let body = doc.body();
    let nav = append(&mut doc, body, "nav");
    let dialog = append(&mut doc, body, "div");
    doc.set_attribute(dialog, "role", "dialog");
    doc.set_attribute(dialog, "id", "settings");
    let close = append(&mut doc, dialog, "button");
    doc.set_attribute(close, "class", "close primary");

    assert_eq!(doc.query_selector("nav"), Some(nav));
    assert_eq!(doc.get_element_by_id("settings"), Some(dialog));
    assert_eq!(doc.query_selector("[role=\"dialog\"]"), Some(dialog));
    assert_eq!(doc.query_selector_in(dialog, ".close"), Some(close));
    assert_eq!(doc.closest(close, "#settings"), Some(dialog));
    assert_eq!(doc.query_selector_all("nav, button").len(), 2);
    assert!(doc.query_selector_all("div >").is_empty());
}

#[test]
fn test_text_and_style() {
    let mut doc = Document::default();
    let body = doc.body();
    let region = append(&mut doc, body, "div");

    doc.set_text_content(region, "Saved").unwrap();
    assert_eq!(doc.text_content(region), "Saved");
    doc.set_text_content(region, "").unwrap();
    assert_eq!(doc.text_content(region), "");

    doc.set_style_property(region, "display", "none");
    let child = append(&mut doc, region, "span");
    assert!(doc.is_hidden(child));
    doc.set_style_property(region, "display", "");
    assert!(!doc.is_hidden(child));
}

// ============================================================================
// FOCUS
// ============================================================================

#[test]
fn test_focus_events_recorded() {
    let mut doc = Document::default();
    let body = doc.body();
    let a = append(&mut doc, body, "button");
    let b = append(&mut doc, body, "button");

    assert!(doc.focus(a));
    assert!(doc.focus(b));
    let kinds: Vec<(DomEventType, NodeId)> = doc
        .drain_events()
        .into_iter()
        .map(|e| (e.event_type, e.target))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (DomEventType::FocusIn, a),
            (DomEventType::FocusOut, a),
            (DomEventType::FocusIn, b),
        ]
    );
    assert!(!doc.has_pending_events());
}

#[test]
fn test_focus_rejects_detached() {
    let mut doc = Document::default();
    let loose = doc.create_element("button");
    assert!(!doc.focus(loose));
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_removing_focused_element_blurs() {
    let mut doc = Document::default();
    let body = doc.body();
    let button = append(&mut doc, body, "button");
    doc.focus(button);
    doc.drain_events();

    doc.remove(button).unwrap();
    assert_eq!(doc.active_element(), None);
    let events = doc.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, DomEventType::FocusOut);
}

#[test]
fn test_tab_order() {
    let mut doc = Document::default();
    let body = doc.body();
    let link = append(&mut doc, body, "a");
    doc.set_attribute(link, "href", "#top");
    let late = append(&mut doc, body, "div");
    doc.set_attribute(late, "tabindex", "2");
    let early = append(&mut doc, body, "div");
    doc.set_attribute(early, "tabindex", "1");
    let script_only = append(&mut doc, body, "div");
    doc.set_attribute(script_only, "tabindex", "-1");
    let hidden = append(&mut doc, body, "button");
    doc.set_style_property(hidden, "display", "none");
    let input = append(&mut doc, body, "input");

    assert_eq!(doc.tab_order(), vec![early, late, link, input]);
}
