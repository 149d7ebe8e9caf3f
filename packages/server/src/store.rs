//! The chat store: user directory, room store and message dispatcher behind
//! one lock.
//!
//! Every operation that reads then writes shared state (membership moves,
//! log appends, reaper sweeps) runs inside a single critical section, so the
//! "one room per user" invariant and log ordering can be enforced at one call
//! site. All accesses are in-memory and O(room size) at worst, so the lock is
//! held briefly.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;

use parlor_shared::time::{Clock, format_timestamp};
use parlor_shared::wire::MessageKind;

use crate::domain::{ChatMessage, Room, RoomName, Username, validate_content};
use crate::error::ChatError;

/// Tunables for the chat store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum messages kept per room log (bounds the join snapshot)
    pub history_limit: usize,
    /// Empty rooms idle longer than this are reaped (seconds)
    pub room_idle_timeout_secs: i64,
    /// When set, a send into a room where the sender is the only member is
    /// rejected instead of accepted. Off by default; both behaviors exist in
    /// the wild, so this is an explicit policy switch.
    pub reject_solo_sends: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            room_idle_timeout_secs: 300,
            reject_solo_sends: false,
        }
    }
}

/// Everything the lock protects
struct ChatState {
    /// User directory: usernames currently registered, server-wide unique
    users: BTreeSet<Username>,
    /// Reverse index user → current room; avoids an O(rooms) scan on join
    memberships: HashMap<Username, RoomName>,
    /// Rooms keyed by name; BTreeMap so listings have a stable order
    rooms: BTreeMap<RoomName, Room>,
    /// Store-wide message sequence counter
    next_seq: u64,
}

/// Member list plus recent visible history returned by `join_room`
#[derive(Debug, Clone)]
pub struct JoinSnapshot {
    pub users: Vec<String>,
    pub messages: Vec<ChatMessage>,
}

/// Owned store for all chat state. Cheap to share: handlers and the reaper
/// hold an `Arc<ChatStore>`.
pub struct ChatStore {
    state: Mutex<ChatState>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl ChatStore {
    pub fn new(clock: Arc<dyn Clock>, config: StoreConfig) -> Self {
        Self {
            state: Mutex::new(ChatState {
                users: BTreeSet::new(),
                memberships: HashMap::new(),
                rooms: BTreeMap::new(),
                next_seq: 0,
            }),
            clock,
            config,
        }
    }

    /// Current server time in wire encoding. Handed to clients at
    /// registration so their polling cursor starts on the server's clock.
    pub fn current_timestamp(&self) -> String {
        format_timestamp(self.clock.now_epoch_secs())
    }

    /// Register a username. Fails with a conflict if it is currently taken.
    pub async fn register_user(&self, username: &str) -> Result<(), ChatError> {
        let username = Username::new(username)?;
        let mut state = self.state.lock().await;
        if !state.users.insert(username.clone()) {
            return Err(ChatError::UserAlreadyExists(username.as_str().to_string()));
        }
        tracing::info!("User '{}' registered", username.as_str());
        Ok(())
    }

    /// Remove a username from the directory and from whichever room it
    /// currently occupies. A stale membership after unregister would be a
    /// correctness bug, so both updates happen in one critical section.
    pub async fn unregister_user(&self, username: &str) -> Result<(), ChatError> {
        let username = Username::new(username)?;
        let mut state = self.state.lock().await;
        if !state.users.remove(&username) {
            return Err(ChatError::UserNotFound(username.as_str().to_string()));
        }
        if let Some(room_name) = state.memberships.remove(&username)
            && let Some(room) = state.rooms.get_mut(&room_name)
        {
            room.remove_member(&username);
        }
        tracing::info!("User '{}' unregistered", username.as_str());
        Ok(())
    }

    /// Create a room. Fails with a conflict if the name is taken.
    pub async fn create_room(&self, room_name: &str) -> Result<(), ChatError> {
        let room_name = RoomName::new(room_name)?;
        let now = self.clock.now_epoch_secs();
        let mut state = self.state.lock().await;
        if state.rooms.contains_key(&room_name) {
            return Err(ChatError::RoomAlreadyExists(room_name.as_str().to_string()));
        }
        state
            .rooms
            .insert(room_name.clone(), Room::new(room_name.clone(), now));
        tracing::info!("Room '{}' created", room_name.as_str());
        Ok(())
    }

    /// Join a room, leaving any previously occupied room.
    ///
    /// All preconditions are checked before any mutation so a failed join
    /// leaves prior membership untouched. Returns the member list and the
    /// recent messages visible to the joining user.
    pub async fn join_room(&self, username: &str, room_name: &str) -> Result<JoinSnapshot, ChatError> {
        let username = Username::new(username)?;
        let room_name = RoomName::new(room_name)?;
        let now = self.clock.now_epoch_secs();
        let mut state = self.state.lock().await;

        if !state.users.contains(&username) {
            return Err(ChatError::UserNotFound(username.as_str().to_string()));
        }
        if !state.rooms.contains_key(&room_name) {
            return Err(ChatError::RoomNotFound(room_name.as_str().to_string()));
        }

        // Single-room membership: leave the old room first, then enter the
        // new one, all under the same lock.
        if let Some(previous) = state.memberships.insert(username.clone(), room_name.clone())
            && previous != room_name
            && let Some(old_room) = state.rooms.get_mut(&previous)
        {
            old_room.remove_member(&username);
        }

        let room = state
            .rooms
            .get_mut(&room_name)
            .ok_or_else(|| ChatError::RoomNotFound(room_name.as_str().to_string()))?;
        room.add_member(username.clone());
        room.touch(now);

        tracing::info!(
            "User '{}' joined room '{}'",
            username.as_str(),
            room_name.as_str()
        );

        Ok(JoinSnapshot {
            users: room.member_names(),
            messages: room.visible_log(&username),
        })
    }

    /// Room names in stable (sorted) order
    pub async fn list_rooms(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .rooms
            .keys()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    /// Member names of a room in sorted order
    pub async fn list_users(&self, room_name: &str) -> Result<Vec<String>, ChatError> {
        let room_name = RoomName::new(room_name)?;
        let state = self.state.lock().await;
        let room = state
            .rooms
            .get(&room_name)
            .ok_or_else(|| ChatError::RoomNotFound(room_name.as_str().to_string()))?;
        Ok(room.member_names())
    }

    /// Append a message to a room's log.
    ///
    /// With a `recipient` the message is tagged unicast and the recipient
    /// must currently be a room member; without one it is a broadcast. The
    /// assigned timestamp is returned in the message.
    pub async fn send_message(
        &self,
        username: &str,
        room_name: &str,
        content: &str,
        recipient: Option<&str>,
    ) -> Result<ChatMessage, ChatError> {
        let username = Username::new(username)?;
        let room_name = RoomName::new(room_name)?;
        validate_content(content)?;
        let recipient = recipient.map(Username::new).transpose()?;

        let now = self.clock.now_epoch_secs();
        let mut state = self.state.lock().await;

        let seq = state.next_seq;
        let room = state
            .rooms
            .get_mut(&room_name)
            .ok_or_else(|| ChatError::RoomNotFound(room_name.as_str().to_string()))?;
        if !room.has_member(&username) {
            return Err(ChatError::NotInRoom {
                user: username.as_str().to_string(),
                room: room_name.as_str().to_string(),
            });
        }
        if let Some(recipient) = &recipient
            && !room.has_member(recipient)
        {
            return Err(ChatError::RecipientNotInRoom {
                recipient: recipient.as_str().to_string(),
                room: room_name.as_str().to_string(),
            });
        }
        if self.config.reject_solo_sends && room.member_count() <= 1 {
            return Err(ChatError::NoOtherMembers(room_name.as_str().to_string()));
        }

        let sent_at_secs = room.clamp_message_secs(now);
        let message = ChatMessage {
            kind: if recipient.is_some() {
                MessageKind::Unicast
            } else {
                MessageKind::Broadcast
            },
            origin: username,
            destination: recipient,
            content: content.to_string(),
            seq,
            sent_at_secs,
            timestamp: format_timestamp(sent_at_secs),
        };
        room.append_message(message.clone(), self.config.history_limit);
        room.touch(now);
        state.next_seq += 1;

        Ok(message)
    }

    /// Full visible log for a member, in chronological order
    pub async fn receive_messages(
        &self,
        username: &str,
        room_name: &str,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.visible_messages(username, room_name, None).await
    }

    /// Visible messages strictly newer than `since`. The comparison is on
    /// the wire encoding, which sorts lexicographically by time, so the
    /// boundary message is never re-delivered.
    pub async fn receive_new_messages(
        &self,
        username: &str,
        room_name: &str,
        since: &str,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.visible_messages(username, room_name, Some(since)).await
    }

    async fn visible_messages(
        &self,
        username: &str,
        room_name: &str,
        since: Option<&str>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let username = Username::new(username)?;
        let room_name = RoomName::new(room_name)?;
        let state = self.state.lock().await;
        let room = state
            .rooms
            .get(&room_name)
            .ok_or_else(|| ChatError::RoomNotFound(room_name.as_str().to_string()))?;
        if !room.has_member(&username) {
            return Err(ChatError::NotInRoom {
                user: username.as_str().to_string(),
                room: room_name.as_str().to_string(),
            });
        }
        let mut messages = room.visible_log(&username);
        if let Some(since) = since {
            messages.retain(|m| m.timestamp.as_str() > since);
        }
        Ok(messages)
    }

    /// Delete rooms that are empty and idle past the configured timeout.
    ///
    /// Emptiness is re-checked under the same lock that joins take, so a
    /// sweep can never race a concurrent join into deleting a live room.
    /// Returns the names of the removed rooms.
    pub async fn sweep_idle_rooms(&self) -> Vec<String> {
        let now = self.clock.now_epoch_secs();
        let timeout = self.config.room_idle_timeout_secs;
        let mut state = self.state.lock().await;

        let stale: Vec<RoomName> = state
            .rooms
            .iter()
            .filter(|(_, room)| room.is_empty() && now - room.last_active_secs() > timeout)
            .map(|(name, _)| name.clone())
            .collect();

        let mut removed = Vec::with_capacity(stale.len());
        for name in stale {
            state.rooms.remove(&name);
            removed.push(name.as_str().to_string());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_shared::time::FixedClock;

    const T0: i64 = 1_700_000_000;

    fn store_with_clock() -> (Arc<FixedClock>, ChatStore) {
        let clock = Arc::new(FixedClock::new(T0));
        let store = ChatStore::new(clock.clone(), StoreConfig::default());
        (clock, store)
    }

    fn store_with_config(config: StoreConfig) -> (Arc<FixedClock>, ChatStore) {
        let clock = Arc::new(FixedClock::new(T0));
        let store = ChatStore::new(clock.clone(), config);
        (clock, store)
    }

    #[tokio::test]
    async fn test_current_timestamp_follows_store_clock() {
        // Test item: the registration-time cursor seed comes from the
        // server's clock, not whatever clock the caller has
        // given:
        let (clock, store) = store_with_clock();

        // when:
        let before = store.current_timestamp();
        clock.advance(5);
        let after = store.current_timestamp();

        // then:
        assert_eq!(before, format_timestamp(T0));
        assert_eq!(after, format_timestamp(T0 + 5));
    }

    #[tokio::test]
    async fn test_register_user_twice_yields_conflict() {
        // Test item: one success and one conflict for a duplicate username
        // given:
        let (_clock, store) = store_with_clock();

        // when:
        let first = store.register_user("alice").await;
        let second = store.register_user("alice").await;

        // then:
        assert!(first.is_ok());
        assert_eq!(second, Err(ChatError::UserAlreadyExists("alice".into())));
    }

    #[tokio::test]
    async fn test_username_free_again_after_unregister() {
        // Test item: unregistering releases the name for re-registration
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();

        // when:
        store.unregister_user("alice").await.unwrap();

        // then:
        assert!(store.register_user("alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_unknown_user_is_not_found() {
        // Test item: unregistering an absent user reports NotFound
        // given:
        let (_clock, store) = store_with_clock();

        // when / then:
        assert_eq!(
            store.unregister_user("ghost").await,
            Err(ChatError::UserNotFound("ghost".into()))
        );
    }

    #[tokio::test]
    async fn test_unregister_removes_room_membership() {
        // Test item: a stale membership never survives an unregister
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when:
        store.unregister_user("alice").await.unwrap();

        // then:
        assert_eq!(store.list_users("lobby").await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_create_room_twice_yields_conflict() {
        // Test item: duplicate room names are rejected
        // given:
        let (_clock, store) = store_with_clock();
        store.create_room("lobby").await.unwrap();

        // when / then:
        assert_eq!(
            store.create_room("lobby").await,
            Err(ChatError::RoomAlreadyExists("lobby".into()))
        );
    }

    #[tokio::test]
    async fn test_join_moves_user_between_rooms() {
        // Test item: joining a second room removes membership in the first
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("a").await.unwrap();
        store.create_room("b").await.unwrap();
        store.join_room("alice", "a").await.unwrap();

        // when:
        store.join_room("alice", "b").await.unwrap();

        // then: alice is in b exactly once and no longer in a
        assert_eq!(store.list_users("a").await.unwrap(), Vec::<String>::new());
        assert_eq!(store.list_users("b").await.unwrap(), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_failed_join_leaves_old_membership_intact() {
        // Test item: joins are all-or-nothing; a failed join must not evict
        // the user from their current room
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("a").await.unwrap();
        store.join_room("alice", "a").await.unwrap();

        // when:
        let result = store.join_room("alice", "missing").await;

        // then:
        assert_eq!(result.unwrap_err(), ChatError::RoomNotFound("missing".into()));
        assert_eq!(store.list_users("a").await.unwrap(), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_join_requires_registered_user() {
        // Test item: joining without prior registration is rejected
        // given:
        let (_clock, store) = store_with_clock();
        store.create_room("lobby").await.unwrap();

        // when / then:
        assert_eq!(
            store.join_room("ghost", "lobby").await.unwrap_err(),
            ChatError::UserNotFound("ghost".into())
        );
    }

    #[tokio::test]
    async fn test_list_rooms_has_stable_order() {
        // Test item: repeated listings return the same ordering absent mutation
        // given:
        let (_clock, store) = store_with_clock();
        for name in ["zebra", "alpha", "lobby"] {
            store.create_room(name).await.unwrap();
        }

        // when:
        let first = store.list_rooms().await;
        let second = store.list_rooms().await;

        // then:
        assert_eq!(first, vec!["alpha", "lobby", "zebra"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_send_requires_membership() {
        // Test item: a non-member cannot send into a room
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();

        // when: alice is registered but never joined
        let result = store.send_message("alice", "lobby", "hi", None).await;

        // then:
        assert_eq!(
            result.unwrap_err(),
            ChatError::NotInRoom {
                user: "alice".into(),
                room: "lobby".into()
            }
        );
    }

    #[tokio::test]
    async fn test_unicast_to_absent_recipient_rejected_and_not_logged() {
        // Test item: a failed unicast leaves the log untouched
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when:
        let result = store
            .send_message("alice", "lobby", "psst", Some("bob"))
            .await;

        // then:
        assert_eq!(
            result.unwrap_err(),
            ChatError::RecipientNotInRoom {
                recipient: "bob".into(),
                room: "lobby".into()
            }
        );
        let log = store.receive_messages("alice", "lobby").await.unwrap();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_solo_send_accepted_by_default() {
        // Test item: with the default policy a sole member may send
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when / then:
        assert!(store.send_message("alice", "lobby", "echo", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_solo_send_rejected_when_policy_enabled() {
        // Test item: the reject_solo_sends switch turns lone sends into
        // precondition failures
        // given:
        let (_clock, store) = store_with_config(StoreConfig {
            reject_solo_sends: true,
            ..StoreConfig::default()
        });
        store.register_user("alice").await.unwrap();
        store.register_user("bob").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when:
        let alone = store.send_message("alice", "lobby", "anyone?", None).await;
        store.join_room("bob", "lobby").await.unwrap();
        let accompanied = store.send_message("alice", "lobby", "there you are", None).await;

        // then:
        assert_eq!(alone.unwrap_err(), ChatError::NoOtherMembers("lobby".into()));
        assert!(accompanied.is_ok());
    }

    #[tokio::test]
    async fn test_send_returns_assigned_timestamp() {
        // Test item: the acknowledgement carries the wire timestamp
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when:
        let message = store.send_message("alice", "lobby", "hi", None).await.unwrap();

        // then:
        assert_eq!(message.timestamp, format_timestamp(T0));
        assert_eq!(message.sent_at_secs, T0);
    }

    #[tokio::test]
    async fn test_timestamps_non_decreasing_in_log_order() {
        // Test item: log order equals chronological order, per room
        // given:
        let (clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();

        // when: several sends with the clock moving (and once stepping back)
        store.send_message("alice", "lobby", "one", None).await.unwrap();
        clock.advance(2);
        store.send_message("alice", "lobby", "two", None).await.unwrap();
        clock.advance(-5); // wall clock steps backwards
        store.send_message("alice", "lobby", "three", None).await.unwrap();

        // then:
        let log = store.receive_messages("alice", "lobby").await.unwrap();
        let stamps: Vec<&str> = log.iter().map(|m| m.timestamp.as_str()).collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
    }

    #[tokio::test]
    async fn test_receive_new_messages_is_strictly_greater() {
        // Test item: the boundary message is never re-delivered and repeated
        // polling with the max seen timestamp drains to empty
        // given:
        let (clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.register_user("bob").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();
        store.join_room("bob", "lobby").await.unwrap();

        store.send_message("alice", "lobby", "first", None).await.unwrap();
        clock.advance(1);
        let second = store.send_message("alice", "lobby", "second", None).await.unwrap();

        // when: bob polls from the first message's timestamp
        let first_ts = format_timestamp(T0);
        let newer = store
            .receive_new_messages("bob", "lobby", &first_ts)
            .await
            .unwrap();

        // then: only the strictly newer message arrives
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].content, "second");
        assert!(newer.iter().all(|m| m.timestamp.as_str() > first_ts.as_str()));

        // and polling again from the max seen timestamp is an idempotent drain
        let drained = store
            .receive_new_messages("bob", "lobby", &second.timestamp)
            .await
            .unwrap();
        assert!(drained.is_empty());
    }

    #[tokio::test]
    async fn test_receive_requires_membership() {
        // Test item: only members may read a room's log
        // given:
        let (_clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("lobby").await.unwrap();

        // when / then:
        assert_eq!(
            store.receive_messages("alice", "lobby").await.unwrap_err(),
            ChatError::NotInRoom {
                user: "alice".into(),
                room: "lobby".into()
            }
        );
        assert_eq!(
            store
                .receive_messages("alice", "nowhere")
                .await
                .unwrap_err(),
            ChatError::RoomNotFound("nowhere".into())
        );
    }

    #[tokio::test]
    async fn test_join_snapshot_is_bounded_and_filtered() {
        // Test item: the join snapshot returns at most history_limit messages
        // and applies the same visibility filter as the receive operations
        // given:
        let (_clock, store) = store_with_config(StoreConfig {
            history_limit: 5,
            ..StoreConfig::default()
        });
        store.register_user("alice").await.unwrap();
        store.register_user("bob").await.unwrap();
        store.register_user("carol").await.unwrap();
        store.create_room("lobby").await.unwrap();
        store.join_room("alice", "lobby").await.unwrap();
        store.join_room("bob", "lobby").await.unwrap();
        for i in 0..8 {
            store
                .send_message("alice", "lobby", &format!("msg {}", i), None)
                .await
                .unwrap();
        }
        store
            .send_message("alice", "lobby", "for bob only", Some("bob"))
            .await
            .unwrap();

        // when:
        let snapshot = store.join_room("carol", "lobby").await.unwrap();

        // then: bounded, and the unicast to bob is filtered out for carol
        assert!(snapshot.messages.len() <= 5);
        assert!(snapshot.messages.iter().all(|m| m.kind == MessageKind::Broadcast));
        assert_eq!(snapshot.users, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_reaper_removes_stale_empty_room() {
        // Test item: an empty room past the idle timeout is swept
        // given:
        let (clock, store) = store_with_clock();
        store.create_room("r").await.unwrap();

        // when: virtual time passes the timeout
        clock.advance(301);
        let removed = store.sweep_idle_rooms().await;

        // then:
        assert_eq!(removed, vec!["r"]);
        assert!(store.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_reaper_spares_room_joined_before_timeout() {
        // Test item: a join refreshes activity, so the room survives the sweep
        // given:
        let (clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("r").await.unwrap();
        clock.advance(200);
        store.join_room("alice", "r").await.unwrap();
        store.unregister_user("alice").await.unwrap(); // empty again, but fresh

        // when:
        clock.advance(150); // 350 since create, 150 since join
        let removed = store.sweep_idle_rooms().await;

        // then:
        assert!(removed.is_empty());
        assert_eq!(store.list_rooms().await, vec!["r"]);
    }

    #[tokio::test]
    async fn test_reaper_spares_occupied_room() {
        // Test item: a room with members is never reaped, however idle
        // given:
        let (clock, store) = store_with_clock();
        store.register_user("alice").await.unwrap();
        store.create_room("r").await.unwrap();
        store.join_room("alice", "r").await.unwrap();

        // when:
        clock.advance(10_000);
        let removed = store.sweep_idle_rooms().await;

        // then:
        assert!(removed.is_empty());
    }

    #[tokio::test]
    async fn test_room_name_reusable_after_reap() {
        // Test item: a reaped room's name can back a fresh create_room
        // given:
        let (clock, store) = store_with_clock();
        store.create_room("r").await.unwrap();
        clock.advance(301);
        store.sweep_idle_rooms().await;

        // when / then:
        assert!(store.create_room("r").await.is_ok());
    }

    #[tokio::test]
    async fn test_end_to_end_broadcast_and_unicast_visibility() {
        // Test item: the spec's end-to-end scenario; carol sees the broadcast
        // but not the unicast addressed to bob
        // given:
        let (clock, store) = store_with_clock();
        store.create_room("lobby").await.unwrap();
        for user in ["alice", "bob", "carol"] {
            store.register_user(user).await.unwrap();
        }
        store.join_room("alice", "lobby").await.unwrap();
        store.join_room("bob", "lobby").await.unwrap();

        // when:
        store.send_message("alice", "lobby", "hi", None).await.unwrap();
        clock.advance(1);
        store
            .send_message("alice", "lobby", "secret", Some("bob"))
            .await
            .unwrap();

        // then: bob sees both, carol only the broadcast
        let bob_view = store.receive_messages("bob", "lobby").await.unwrap();
        assert_eq!(
            bob_view.iter().map(|m| m.content.as_str()).collect::<Vec<_>>(),
            vec!["hi", "secret"]
        );

        let carol_join = store.join_room("carol", "lobby").await.unwrap();
        assert_eq!(
            carol_join
                .messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>(),
            vec!["hi"]
        );
        let carol_view = store.receive_messages("carol", "lobby").await.unwrap();
        assert_eq!(carol_view.len(), 1);
        assert_eq!(carol_view[0].content, "hi");
    }
}
