//! Room entity: member set, bounded message log, activity tracking.

use std::collections::BTreeSet;

use super::{ChatMessage, RoomName, Username};

/// A chat room. Membership is a sorted set so member lists come out in a
/// consistent order; the log keeps insertion order, which equals
/// chronological order because timestamps are assigned under the store lock.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: RoomName,
    members: BTreeSet<Username>,
    log: Vec<ChatMessage>,
    /// Unix timestamp (seconds) of the last join or send; drives reaping
    last_active_secs: i64,
    /// High-water mark for message timestamps, kept non-decreasing
    last_message_secs: i64,
}

impl Room {
    pub fn new(name: RoomName, now_secs: i64) -> Self {
        Self {
            name,
            members: BTreeSet::new(),
            log: Vec::new(),
            last_active_secs: now_secs,
            last_message_secs: 0,
        }
    }

    /// Refresh the activity timestamp
    pub fn touch(&mut self, now_secs: i64) {
        self.last_active_secs = now_secs;
    }

    pub fn last_active_secs(&self) -> i64 {
        self.last_active_secs
    }

    /// Clamp a candidate message timestamp so the log stays non-decreasing
    /// even if the wall clock steps backwards.
    pub fn clamp_message_secs(&self, now_secs: i64) -> i64 {
        now_secs.max(self.last_message_secs)
    }

    pub fn add_member(&mut self, user: Username) {
        self.members.insert(user);
    }

    pub fn remove_member(&mut self, user: &Username) {
        self.members.remove(user);
    }

    pub fn has_member(&self, user: &Username) -> bool {
        self.members.contains(user)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in sorted order
    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|u| u.as_str().to_string()).collect()
    }

    /// Append a message, truncating the log to the most recent
    /// `history_limit` entries, and advance the timestamp high-water mark.
    pub fn append_message(&mut self, message: ChatMessage, history_limit: usize) {
        self.last_message_secs = self.last_message_secs.max(message.sent_at_secs);
        self.log.push(message);
        if self.log.len() > history_limit {
            let excess = self.log.len() - history_limit;
            self.log.drain(..excess);
        }
    }

    /// Messages visible to `user`, in chronological order
    pub fn visible_log(&self, user: &Username) -> Vec<ChatMessage> {
        self.log
            .iter()
            .filter(|m| m.visible_to(user))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub fn log_len(&self) -> usize {
        self.log.len()
    }
}
