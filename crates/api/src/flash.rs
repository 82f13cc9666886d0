//! Per-user flash message queue for the interactive surface.
//!
//! Redirect responses cannot carry advisories in their body, so the
//! interactive flow parks them here keyed by user id; the next list
//! request from the same user drains them into its response.

use std::collections::HashMap;
use std::sync::Mutex;

use stockmove_core::outcome::OutcomeMessage;
use stockmove_core::types::DbId;

/// Per-user retention limit. A user who keeps posting forms without
/// ever loading the list view would otherwise grow their queue without
/// bound; past the cap the oldest messages are dropped.
const MAX_PENDING_PER_USER: usize = 64;

#[derive(Debug, Default)]
pub struct FlashQueue {
    inner: Mutex<HashMap<DbId, Vec<OutcomeMessage>>>,
}

impl FlashQueue {
    /// Append messages to the user's queue, preserving order. Keeps at
    /// most [`MAX_PENDING_PER_USER`] messages, dropping the oldest.
    pub fn push_all(&self, user_id: DbId, messages: Vec<OutcomeMessage>) {
        if messages.is_empty() {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let queue = inner.entry(user_id).or_default();
        queue.extend(messages);
        if queue.len() > MAX_PENDING_PER_USER {
            let overflow = queue.len() - MAX_PENDING_PER_USER;
            queue.drain(..overflow);
        }
    }

    /// Remove and return all queued messages for the user.
    pub fn drain(&self, user_id: DbId) -> Vec<OutcomeMessage> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.remove(&user_id).unwrap_or_default()
    }
}
