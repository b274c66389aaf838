//! Document - High-level document API

use std::collections::VecDeque;

use crate::{
    DomError, DomEvent, DomTree, ElementData, NodeId, Selector, SelectorList, StyleDeclaration,
    TabIndex,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    /// Currently focused element (None means the body has focus)
    active_element: Option<NodeId>,
    /// Events recorded since the last drain
    pending: VecDeque<DomEvent>,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under the root cannot violate the hierarchy
        let root = tree.root();
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            active_element: None,
            pending: VecDeque::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.element(id)
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.tree.append_child(parent, child)
    }

    /// Detach a node. Focus inside the removed subtree falls back to the body.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.tree.detach(id)?;
        if let Some(active) = self.active_element {
            if self.tree.contains(id, active) {
                self.active_element = None;
                self.pending.push_back(DomEvent::focus_out(active, None));
            }
        }
        Ok(())
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.contains(ancestor, node)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(id))
    }

    /// First connected element matching `selector`
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_in(self.tree.root(), selector)
    }

    /// All connected elements matching `selector`, in tree order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_in(self.tree.root(), selector)
    }

    pub fn query_selector_in(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let list = parse_selector(selector)?;
        self.tree
            .descendants(root)
            .into_iter()
            .find(|&n| self.element(n).is_some_and(|e| list.matches(e)))
    }

    pub fn query_selector_all_in(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(list) = parse_selector(selector) else {
            return Vec::new();
        };
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| list.matches(e)))
            .collect()
    }

    /// Closest inclusive ancestor matching `selector`
    pub fn closest(&self, id: NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        let mut current = Some(id);
        while let Some(node) = current {
            if self.element(node).is_some_and(|e| sel.matches(e)) {
                return Some(node);
            }
            current = self.tree.parent(node);
        }
        None
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute. Returns false for non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(elem) = self.tree.element_mut(id) else {
            return false;
        };
        let old = elem.attrs.set(name, value);
        if old.as_deref() != Some(value) {
            self.pending
                .push_back(DomEvent::attr_modified(id, name, old.as_deref(), Some(value)));
        }
        true
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let old = self.tree.element_mut(id)?.attrs.remove(name)?;
        self.pending
            .push_back(DomEvent::attr_modified(id, name, Some(&old.value), None));
        Some(old.value)
    }

    // ------------------------------------------------------------------
    // Style and text
    // ------------------------------------------------------------------

    pub fn style(&self, id: NodeId) -> Option<&StyleDeclaration> {
        self.element(id).map(|e| &e.style)
    }

    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.style(id).and_then(|s| s.get_property(name))
    }

    /// `element.style.setProperty(name, value)`; empty value removes
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.tree.element_mut(id) {
            Some(elem) => {
                elem.style.set_property(name, value);
                true
            }
            None => false,
        }
    }

    /// Whether the element or an ancestor has inline `display: none`
    pub fn is_hidden(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.style_property(node, "display") == Some("none") {
                return true;
            }
            current = self.tree.parent(node);
        }
        false
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.tree.set_text_content(id, text)
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Focused element, if any
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to a connected element.
    ///
    /// Queues `focusout`/`focusin` events. Focusing the already focused
    /// element is a no-op that still reports success.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.element(id).is_none() || !self.tree.is_connected(id) {
            tracing::debug!("Ignoring focus on unavailable node {:?}", id);
            return false;
        }
        if self.active_element == Some(id) {
            return true;
        }
        let previous = self.active_element.replace(id);
        if let Some(prev) = previous {
            self.pending.push_back(DomEvent::focus_out(prev, Some(id)));
        }
        self.pending.push_back(DomEvent::focus_in(id, previous));
        true
    }

    /// Drop focus back to the body
    pub fn blur(&mut self) {
        if let Some(prev) = self.active_element.take() {
            self.pending.push_back(DomEvent::focus_out(prev, None));
        }
    }

    /// Keyboard-focusable descendants of `container`, in tree order
    pub fn focusable_within(&self, container: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(container)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(ElementData::is_keyboard_focusable))
            .collect()
    }

    /// Sequential navigation order: positive tabindex ascending, then
    /// tabindex 0 and natively focusable elements in tree order. Hidden
    /// and script-only elements are skipped.
    pub fn tab_order(&self) -> Vec<NodeId> {
        let mut positive = Vec::new();
        let mut rest = Vec::new();
        for node in self.focusable_within(self.tree.root()) {
            if self.is_hidden(node) {
                continue;
            }
            match self.element(node).and_then(ElementData::tab_index) {
                Some(TabIndex::ScriptOnly) => {}
                Some(TabIndex::Sequential(n)) if n > 0 => positive.push((n, node)),
                _ => rest.push(node),
            }
        }
        positive.sort_by_key(|&(n, _)| n);
        positive.into_iter().map(|(_, node)| node).chain(rest).collect()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<DomEvent> {
        self.pending.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

fn parse_selector(selector: &str) -> Option<SelectorList> {
    let list = SelectorList::parse(selector);
    if list.is_none() {
        tracing::debug!("Unsupported selector: {}", selector);
    }
    list
}
