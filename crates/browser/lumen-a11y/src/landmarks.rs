//! Landmarks and Skip Links
//!
//! Implicit ARIA roles for page landmarks, and skip links that move
//! focus to their target.

use lumen_dom::{Document, NodeId};

use crate::{Locale, TimerQueue, TimerTask};

/// Class marking a skip link
pub const SKIP_LINK_CLASS: &str = "skip-link";

/// Landmark tags and the role each gets when none is set
const LANDMARK_ROLES: &[(&str, &str)] = &[
    ("main", "main"),
    ("header", "banner"),
    ("footer", "contentinfo"),
];

/// Add missing landmark roles and the navigation label. Returns the
/// number of attributes added.
pub fn enhance_landmarks(doc: &mut Document, locale: Locale) -> usize {
    let mut added = 0;

    for (tag, role) in LANDMARK_ROLES {
        if let Some(el) = doc.query_selector(tag) {
            if doc.get_attribute(el, "role").is_none_or(str::is_empty) {
                doc.set_attribute(el, "role", role);
                added += 1;
            }
        }
    }

    if let Some(nav) = doc.query_selector("nav") {
        if doc.get_attribute(nav, "aria-label").is_none_or(str::is_empty) {
            doc.set_attribute(nav, "aria-label", locale.navigation_label());
            added += 1;
        }
    }

    tracing::debug!("Landmarks enhanced ({} attributes)", added);
    added
}

/// The skip link at or above `node`, if any
pub fn skip_link_for(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.closest(node, &format!(".{SKIP_LINK_CLASS}"))
}

/// Element a skip link points at (`href="#id"`)
pub fn skip_target(doc: &Document, link: NodeId) -> Option<NodeId> {
    let href = doc.get_attribute(link, "href")?;
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    doc.get_element_by_id(id)
}

/// Make the target focusable, focus it and schedule removal of the
/// temporary tabindex
pub fn activate_skip_link(
    doc: &mut Document,
    link: NodeId,
    timers: &mut TimerQueue,
    tabindex_ms: u64,
) -> Option<NodeId> {
    let Some(target) = skip_target(doc, link) else {
        tracing::debug!("Skip link {:?} has no target", link);
        return None;
    };
    doc.set_attribute(target, "tabindex", "-1");
    doc.focus(target);
    timers.set_timeout(TimerTask::RemoveTabIndex(target), tabindex_ms);
    Some(target)
}
