//! Per-user session state: the active knowledge section.
//!
//! One entry per user, created lazily on first read, overwritten
//! whenever a section command fires. No TTL; lives for the process
//! lifetime. The store is the only shared mutable state in the bot,
//! guarded by a mutex with short critical sections.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::section::Section;

/// The active section for one user, with the static text that was
/// bound to it when it was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub section: Section,
    pub content: String,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            section: Section::Rules,
            content: Section::Rules.static_content().to_string(),
        }
    }
}

/// User-scoped session map. Constructed once at startup and shared by
/// reference; keys are the transport's opaque user identifiers.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for a user, defaulting to the rules section for
    /// users never seen before. Never fails.
    pub fn get(&self, user_id: i64) -> Session {
        let sessions = self.inner.lock().expect("session store poisoned");
        sessions.get(&user_id).cloned().unwrap_or_default()
    }

    /// Atomically replace the user's session. Last write wins; never fails.
    pub fn set(&self, user_id: i64, section: Section, content: impl Into<String>) {
        let mut sessions = self.inner.lock().expect("session store poisoned");
        sessions.insert(
            user_id,
            Session {
                section,
                content: content.into(),
            },
        );
    }
}
