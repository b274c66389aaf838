//! Screen Reader Announcements
//!
//! A single polite, atomic live region appended to the body on first
//! use. Each message is cleared after a fixed window so repeating the
//! same text later is announced again.

use lumen_dom::{Document, NodeId};

use crate::{TimerId, TimerQueue, TimerTask};

/// `id` of the live region element
pub const ANNOUNCER_ID: &str = "aria-announcer";

/// Live region announcer
#[derive(Debug)]
pub struct Announcer {
    region: Option<NodeId>,
    /// Clear timer of the message currently shown
    pending_clear: Option<TimerId>,
    clear_after_ms: u64,
}

impl Announcer {
    pub fn new(clear_after_ms: u64) -> Self {
        Self {
            region: None,
            pending_clear: None,
            clear_after_ms,
        }
    }

    /// Live region element, if created
    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Current live region text
    pub fn text(&self, doc: &Document) -> String {
        self.region.map(|r| doc.text_content(r)).unwrap_or_default()
    }

    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear.is_some()
    }

    /// Reuse the region if it is still in the document, adopt an
    /// existing `#aria-announcer`, or create one.
    fn ensure_region(&mut self, doc: &mut Document) -> NodeId {
        if let Some(region) = self.region.filter(|&r| doc.is_connected(r)) {
            return region;
        }

        let region = match doc.get_element_by_id(ANNOUNCER_ID) {
            Some(existing) => existing,
            None => {
                let region = doc.create_element("div");
                doc.set_attribute(region, "id", ANNOUNCER_ID);
                doc.set_attribute(region, "aria-live", "polite");
                doc.set_attribute(region, "aria-atomic", "true");
                doc.set_attribute(region, "class", "sr-only");
                let body = doc.body();
                if let Err(e) = doc.append_child(body, region) {
                    tracing::warn!("Could not attach live region: {}", e);
                }
                region
            }
        };
        self.region = Some(region);
        region
    }

    /// Show `message` now and clear it after the window.
    ///
    /// A pending clear from an earlier message is cancelled first, so it
    /// can never erase this one.
    pub fn announce(&mut self, doc: &mut Document, timers: &mut TimerQueue, message: &str) {
        let region = self.ensure_region(doc);
        if let Err(e) = doc.set_text_content(region, message) {
            tracing::warn!("Could not update live region: {}", e);
            return;
        }
        tracing::debug!("Announced: {}", message);

        if let Some(previous) = self.pending_clear.take() {
            timers.clear(previous);
        }
        self.pending_clear = Some(timers.set_timeout(TimerTask::ClearAnnouncement, self.clear_after_ms));
    }

    /// Timer callback. Only the timer of the current message clears it.
    pub fn on_clear_timer(&mut self, doc: &mut Document, id: TimerId) {
        if self.pending_clear != Some(id) {
            return;
        }
        self.pending_clear = None;
        if let Some(region) = self.region {
            if let Err(e) = doc.set_text_content(region, "") {
                tracing::warn!("Could not clear live region: {}", e);
            }
        }
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ANNOUNCE_CLEAR_MS)
    }
}
