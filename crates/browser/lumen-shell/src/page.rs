//! Demo Page
//!
//! A small document with every structure the layer enhances.

use lumen_a11y::THEME_ATTRIBUTE;
use lumen_dom::{Document, DomError, NodeId};

/// Build the demo page
pub fn demo_page(url: &str) -> Result<Document, DomError> {
    let mut doc = Document::new(url);
    let body = doc.body();

    element(&mut doc, body, "a", &[("class", "skip-link"), ("href", "#content")], "Skip to content")?;

    let header = element(&mut doc, body, "header", &[], "")?;
    let nav = element(&mut doc, header, "nav", &[], "")?;
    element(&mut doc, nav, "a", &[("href", "/")], "Home")?;
    element(&mut doc, nav, "a", &[("href", "/about")], "About")?;
    for (theme, label) in [("default", "Default"), ("dark", "Dark"), ("high-contrast", "High contrast")] {
        element(&mut doc, header, "button", &[(THEME_ATTRIBUTE, theme)], label)?;
    }

    let main = element(&mut doc, body, "main", &[("id", "content")], "")?;
    element(&mut doc, main, "h1", &[], "Welcome")?;
    element(&mut doc, main, "button", &[("id", "open-settings")], "Settings")?;

    let dialog = element(
        &mut doc,
        body,
        "div",
        &[("id", "settings"), ("role", "dialog"), ("aria-modal", "true")],
        "",
    )?;
    doc.set_style_property(dialog, "display", "none");
    element(&mut doc, dialog, "input", &[("type", "checkbox"), ("id", "motion")], "")?;
    element(&mut doc, dialog, "button", &[], "Save")?;
    element(&mut doc, dialog, "button", &[], "Close")?;

    element(&mut doc, body, "footer", &[], "Lumen demo")?;
    Ok(doc)
}

fn element(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<NodeId, DomError> {
    let id = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attribute(id, name, value);
    }
    if !text.is_empty() {
        doc.set_text_content(id, text)?;
    }
    doc.append_child(parent, id)?;
    Ok(id)
}

/// Short description of a node for logs
pub fn describe(doc: &Document, node: Option<NodeId>) -> String {
    let Some(node) = node else {
        return "body".to_string();
    };
    let Some(element) = doc.element(node) else {
        return format!("{node:?}");
    };
    match element.id() {
        Some(id) => format!("{}#{}", element.tag, id),
        None => {
            let text = doc.text_content(node);
            if text.is_empty() {
                element.tag.clone()
            } else {
                format!("{} \"{}\"", element.tag, text)
            }
        }
    }
}
