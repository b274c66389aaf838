//! Focusability
//!
//! Which elements take part in keyboard focus.

use crate::ElementData;

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// tabindex="-1" (or any negative value): focusable by script only
    ScriptOnly,
    /// tabindex="0" or positive
    Sequential(i32),
}

impl TabIndex {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Some(Self::ScriptOnly),
            Ok(n) => Some(Self::Sequential(n)),
            Err(_) => None,
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

/// Tags that are focusable without a tabindex
const NATIVE_FOCUSABLE: &[&str] = &["button", "input", "select", "textarea"];

impl ElementData {
    /// Matches `button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])`
    pub fn is_keyboard_focusable(&self) -> bool {
        if NATIVE_FOCUSABLE.contains(&self.tag.as_str()) || self.has_attr("href") {
            return true;
        }
        match self.get_attr("tabindex") {
            Some(v) => v.trim() != "-1",
            None => false,
        }
    }

    /// Parsed tabindex attribute
    pub fn tab_index(&self) -> Option<TabIndex> {
        self.get_attr("tabindex").and_then(TabIndex::parse)
    }
}
