//! Selectors
//!
//! Compound selectors (`tag#id.class[attr="value"]`) and comma lists.
//! Combinators and pseudo-classes are not supported.

use std::iter::Peekable;
use std::str::Chars;

use crate::ElementData;

/// Compound selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// `[name]` or `[name="value"]`
    pub attrs: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

impl Selector {
    /// Parse a compound selector
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut sel = Selector::default();
        let mut chars = s.chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                '*' => {
                    chars.next();
                }
                '#' => {
                    chars.next();
                    let id = take_ident(&mut chars);
                    if id.is_empty() {
                        return None;
                    }
                    sel.id = Some(id);
                }
                '.' => {
                    chars.next();
                    let class = take_ident(&mut chars);
                    if class.is_empty() {
                        return None;
                    }
                    sel.classes.push(class);
                }
                '[' => {
                    chars.next();
                    let body: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    let (name, value) = match body.split_once('=') {
                        Some((n, v)) => {
                            let v = v.trim().trim_matches(|c| c == '"' || c == '\'');
                            (n.trim(), Some(v.to_string()))
                        }
                        None => (body.trim(), None),
                    };
                    if name.is_empty() || !name.chars().all(is_ident_char) {
                        return None;
                    }
                    sel.attrs.push((name.to_ascii_lowercase(), value));
                }
                c if is_ident_char(c) && sel.tag.is_none() => {
                    sel.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
                }
                _ => return None,
            }
        }

        Some(sel)
    }

    /// Check if an element matches
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if &element.tag != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(v) => element.get_attr(name) == Some(v.as_str()),
            None => element.has_attr(name),
        })
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    pub fn parse(s: &str) -> Option<Self> {
        s.split(',')
            .map(Selector::parse)
            .collect::<Option<Vec<_>>>()
            .filter(|v| !v.is_empty())
            .map(Self)
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        self.0.iter().any(|s| s.matches(element))
    }
}
