//! In-memory chat state: session registry, room directory and identity
//! directory under a single owner.
//!
//! Every lifecycle transition (register, join, send, disconnect) is one
//! synchronous method so that a caller holding the state behind a single
//! lock observes the invariant: each handle in a room's member set belongs
//! to a session whose current room is that room.
//!
//! Transition methods return snapshot structs carrying everything the
//! lifecycle layer needs for fan-out (history, user lists, room names), so
//! no payload is built from a second, possibly divergent read.

use std::collections::HashMap;

use super::{
    entity::{ChatMessage, Room, Session, UserEntry},
    error::StateError,
    value_object::{MessageContent, Nickname, RoomName, SessionId, Timestamp},
};

/// Maximum number of messages retained per room (oldest evicted first)
pub const HISTORY_LIMIT: usize = 100;

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterTransition {
    /// Current room names, directory insertion order
    pub rooms: Vec<String>,
    /// Refreshed global user list
    pub all_users: Vec<UserEntry>,
}

/// A room a session was removed from during a join or disconnect
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub room: RoomName,
    /// Nickname to announce as "left", if the session had one
    pub announce: Option<Nickname>,
    /// Room user list refreshed after the removal
    pub user_list: Vec<UserEntry>,
}

/// Result of a successful room join
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTransition {
    /// The old room the session left, if it was in one
    pub departed: Option<Departure>,
    /// Full room name list when the join created a new room
    pub created_rooms: Option<Vec<String>>,
    /// History replay for the joining session, most-recent-last
    pub history: Vec<ChatMessage>,
    /// Refreshed user list of the joined room
    pub user_list: Vec<UserEntry>,
    /// Refreshed global user list
    pub all_users: Vec<UserEntry>,
}

/// Result of recording a chat message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTransition {
    pub room: RoomName,
    pub message: ChatMessage,
}

/// Result of removing a session
#[derive(Debug, Clone, PartialEq)]
pub struct DisconnectTransition {
    /// Every room the handle was removed from
    pub departures: Vec<Departure>,
    /// Refreshed global user list
    pub all_users: Vec<UserEntry>,
}

/// Session registry, room directory and identity directory.
///
/// Owned state with an explicit lifecycle: created at process start, mutated
/// throughout, dropped at process stop. Tests inject a fresh instance.
#[derive(Debug, Default)]
pub struct ChatState {
    next_session_id: u64,
    sessions: HashMap<SessionId, Session>,
    rooms: HashMap<RoomName, Room>,
    /// Directory insertion order of room names, exposed as the room list
    room_order: Vec<RoomName>,
    /// Nickname -> last-seen avatar; never deleted while the process runs
    identities: HashMap<Nickname, String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state pre-seeded with the given rooms.
    pub fn with_rooms(rooms: Vec<RoomName>) -> Self {
        let mut state = Self::new();
        for room in rooms {
            state.ensure_room(&room);
        }
        state
    }

    /// Issue a stable identifier and create a session with all fields unset.
    pub fn create_session(&mut self) -> SessionId {
        self.next_session_id += 1;
        let id = SessionId::new(self.next_session_id);
        self.sessions.insert(id, Session::new(id));
        id
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// Store the nickname/avatar on the session and remember the avatar in
    /// the identity directory when one was supplied.
    pub fn register_user(
        &mut self,
        id: SessionId,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<RegisterTransition, StateError> {
        let avatar = avatar.filter(|a| !a.is_empty());

        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(StateError::SessionNotFound(id))?;
        session.nickname = Some(nickname.clone());
        session.avatar = avatar.clone();

        if let Some(avatar) = avatar {
            self.identities.insert(nickname, avatar);
        }

        Ok(RegisterTransition {
            rooms: self.list_room_names(),
            all_users: self.global_user_list(),
        })
    }

    /// Move a session into `room`, leaving its old room first.
    ///
    /// The room is created when absent. The avatar falls back to the
    /// identity directory when the join omitted one.
    pub fn join_room(
        &mut self,
        id: SessionId,
        room: RoomName,
        nickname: Nickname,
        avatar: Option<String>,
    ) -> Result<JoinTransition, StateError> {
        if !self.sessions.contains_key(&id) {
            return Err(StateError::SessionNotFound(id));
        }

        // Leave the old room before touching anything else; the announce
        // nickname is the one recorded before this join overwrites it.
        let old_room = self.sessions.get(&id).and_then(|s| s.room.clone());
        let departed = old_room.map(|old| {
            self.remove_member(&old, id);
            let announce = self.sessions.get(&id).and_then(|s| s.nickname.clone());
            Departure {
                user_list: self.room_user_list(&old),
                room: old,
                announce,
            }
        });

        let created = self.ensure_room(&room);
        let created_rooms = created.then(|| self.list_room_names());

        let avatar = avatar
            .filter(|a| !a.is_empty())
            .or_else(|| self.identities.get(&nickname).cloned());

        if let Some(session) = self.sessions.get_mut(&id) {
            session.nickname = Some(nickname.clone());
            session.room = Some(room.clone());
            session.avatar = avatar.clone();
        }
        if let Some(avatar) = avatar {
            self.identities.insert(nickname, avatar);
        }

        if let Some(r) = self.rooms.get_mut(&room) {
            r.members.insert(id);
        }

        Ok(JoinTransition {
            departed,
            created_rooms,
            history: self.recent_history(&room, HISTORY_LIMIT),
            user_list: self.room_user_list(&room),
            all_users: self.global_user_list(),
        })
    }

    /// Stamp and append a message to the session's current room.
    ///
    /// Returns `Ok(None)` when the session has no room to target (a send
    /// while not in a room is silently ignored).
    pub fn record_message(
        &mut self,
        id: SessionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<Option<MessageTransition>, StateError> {
        let session = self.sessions.get(&id).ok_or(StateError::SessionNotFound(id))?;
        let (Some(nickname), Some(room)) = (session.nickname.clone(), session.room.clone()) else {
            return Ok(None);
        };
        let avatar = session.avatar.clone();

        let message = ChatMessage::new(nickname, content, timestamp, avatar);
        self.append_history(&room, message.clone());

        Ok(Some(MessageTransition { room, message }))
    }

    /// Remove a session and its room memberships.
    ///
    /// Idempotent: returns `None` when the session is already gone, so a
    /// second disconnect produces no observable effect. Every room is
    /// scanned; membership cleanup does not trust `session.room` alone.
    pub fn disconnect_session(&mut self, id: SessionId) -> Option<DisconnectTransition> {
        let session = self.sessions.remove(&id)?;

        let mut departures = Vec::new();
        for name in self.room_order.clone() {
            let removed = self
                .rooms
                .get_mut(&name)
                .map(|r| r.members.remove(&id))
                .unwrap_or(false);
            if removed {
                departures.push(Departure {
                    user_list: self.room_user_list(&name),
                    room: name,
                    announce: session.nickname.clone(),
                });
            }
        }

        Some(DisconnectTransition {
            departures,
            all_users: self.global_user_list(),
        })
    }

    /// Create the room when absent. Returns `true` when it was created.
    pub fn ensure_room(&mut self, name: &RoomName) -> bool {
        if self.rooms.contains_key(name) {
            return false;
        }
        self.rooms.insert(name.clone(), Room::new(name.clone()));
        self.room_order.push(name.clone());
        true
    }

    /// Remove a handle from a room's member set; a no-op when either is absent.
    pub fn remove_member(&mut self, room: &RoomName, id: SessionId) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.members.remove(&id);
        }
    }

    pub fn room_members(&self, room: &RoomName) -> Vec<SessionId> {
        self.rooms
            .get(room)
            .map(|r| r.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Room names in directory insertion order (not sorted).
    pub fn list_room_names(&self) -> Vec<String> {
        self.room_order
            .iter()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    /// Up to the last `limit` history entries, most-recent-last.
    pub fn recent_history(&self, room: &RoomName, limit: usize) -> Vec<ChatMessage> {
        self.rooms
            .get(room)
            .map(|r| {
                let skip = r.history.len().saturating_sub(limit);
                r.history.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    /// Last-seen avatar for a nickname, if any.
    pub fn recall_avatar(&self, nickname: &Nickname) -> Option<&str> {
        self.identities.get(nickname).map(String::as_str)
    }

    /// Room user list: member handles joined against the session registry,
    /// filtered to sessions whose recorded room still equals this room,
    /// sorted case-insensitively by nickname.
    pub fn room_user_list(&self, room: &RoomName) -> Vec<UserEntry> {
        let Some(r) = self.rooms.get(room) else {
            return Vec::new();
        };
        let mut users: Vec<UserEntry> = r
            .members
            .iter()
            .filter_map(|id| self.sessions.get(id))
            .filter(|s| s.room.as_ref() == Some(room))
            .filter_map(|s| {
                s.nickname.clone().map(|nickname| UserEntry {
                    nickname,
                    avatar: s.avatar.clone(),
                })
            })
            .collect();
        sort_user_list(&mut users);
        users
    }

    /// Global user list: every session with a nickname, independent of room
    /// membership, sorted case-insensitively and deduplicated by nickname.
    pub fn global_user_list(&self) -> Vec<UserEntry> {
        let mut users: Vec<UserEntry> = self
            .sessions
            .values()
            .filter_map(|s| {
                s.nickname.clone().map(|nickname| UserEntry {
                    nickname,
                    avatar: s.avatar.clone(),
                })
            })
            .collect();
        sort_user_list(&mut users);
        users.dedup_by(|a, b| a.nickname == b.nickname);
        users
    }

    fn append_history(&mut self, room: &RoomName, message: ChatMessage) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.history.push_back(message);
            while r.history.len() > HISTORY_LIMIT {
                r.history.pop_front();
            }
        }
    }
}

fn sort_user_list(users: &mut [UserEntry]) {
    users.sort_by(|a, b| {
        a.nickname
            .as_str()
            .to_lowercase()
            .cmp(&b.nickname.as_str().to_lowercase())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nickname(s: &str) -> Nickname {
        Nickname::new(s.to_string()).unwrap()
    }

    fn room(s: &str) -> RoomName {
        RoomName::new(s.to_string()).unwrap()
    }

    fn content(s: &str) -> MessageContent {
        MessageContent::new(s.to_string()).unwrap()
    }

    /// Every handle in every room's member set must belong to a session
    /// whose current room equals that room.
    fn assert_consistent(state: &ChatState) {
        for name in &state.room_order {
            for id in state.room_members(name) {
                let session = state
                    .session(id)
                    .unwrap_or_else(|| panic!("member {id} of '{name}' has no session"));
                assert_eq!(
                    session.room.as_ref(),
                    Some(name),
                    "member {id} of '{name}' is recorded in a different room"
                );
            }
        }
    }

    #[test]
    fn test_create_session_starts_with_unset_fields() {
        // given:
        let mut state = ChatState::new();

        // when:
        let id = state.create_session();

        // then:
        let session = state.session(id).unwrap();
        assert!(session.nickname.is_none());
        assert!(session.room.is_none());
        assert!(session.avatar.is_none());
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn test_create_session_issues_distinct_ids() {
        // given:
        let mut state = ChatState::new();

        // when:
        let a = state.create_session();
        let b = state.create_session();
        let c = state.create_session();

        // then:
        assert!(a != b && b != c && a != c);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_register_user_sets_identity_and_returns_snapshot() {
        // given:
        let mut state = ChatState::with_rooms(vec![room("#geral")]);
        let id = state.create_session();

        // when:
        let transition = state
            .register_user(id, nickname("alice"), Some("cat.png".to_string()))
            .unwrap();

        // then:
        assert_eq!(transition.rooms, vec!["#geral".to_string()]);
        assert_eq!(transition.all_users.len(), 1);
        assert_eq!(transition.all_users[0].nickname.as_str(), "alice");
        assert_eq!(state.recall_avatar(&nickname("alice")), Some("cat.png"));
        assert_consistent(&state);
    }

    #[test]
    fn test_register_user_with_empty_avatar_does_not_touch_identity_directory() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();

        // when:
        state
            .register_user(id, nickname("alice"), Some(String::new()))
            .unwrap();

        // then:
        assert_eq!(state.recall_avatar(&nickname("alice")), None);
    }

    #[test]
    fn test_register_unknown_session_fails() {
        // given:
        let mut state = ChatState::new();

        // when:
        let result = state.register_user(SessionId::new(99), nickname("alice"), None);

        // then:
        assert_eq!(result, Err(StateError::SessionNotFound(SessionId::new(99))));
    }

    #[test]
    fn test_join_creates_room_and_adds_member() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();

        // when:
        let transition = state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // then:
        assert!(transition.departed.is_none());
        assert_eq!(
            transition.created_rooms,
            Some(vec!["#geral".to_string()])
        );
        assert!(transition.history.is_empty());
        assert_eq!(transition.user_list.len(), 1);
        assert_eq!(state.room_members(&room("#geral")), vec![id]);
        assert_eq!(state.session(id).unwrap().room, Some(room("#geral")));
        assert_consistent(&state);
    }

    #[test]
    fn test_join_existing_room_does_not_report_creation() {
        // given:
        let mut state = ChatState::new();
        let a = state.create_session();
        let b = state.create_session();
        state
            .join_room(a, room("#geral"), nickname("alice"), None)
            .unwrap();

        // when:
        let transition = state
            .join_room(b, room("#geral"), nickname("bob"), None)
            .unwrap();

        // then:
        assert!(transition.created_rooms.is_none());
        assert_eq!(transition.user_list.len(), 2);
        assert_consistent(&state);
    }

    #[test]
    fn test_join_leaves_old_room_with_departure_snapshot() {
        // given:
        let mut state = ChatState::new();
        let alice = state.create_session();
        let bob = state.create_session();
        state
            .join_room(alice, room("#geral"), nickname("alice"), None)
            .unwrap();
        state
            .join_room(bob, room("#geral"), nickname("bob"), None)
            .unwrap();

        // when: alice switches rooms
        let transition = state
            .join_room(alice, room("#python"), nickname("alice"), None)
            .unwrap();

        // then: the departure names the old room and its refreshed user list
        let departed = transition.departed.unwrap();
        assert_eq!(departed.room, room("#geral"));
        assert_eq!(departed.announce, Some(nickname("alice")));
        assert_eq!(departed.user_list.len(), 1);
        assert_eq!(departed.user_list[0].nickname.as_str(), "bob");

        assert!(!state.room_members(&room("#geral")).contains(&alice));
        assert_eq!(state.room_members(&room("#python")), vec![alice]);
        assert_consistent(&state);
    }

    #[test]
    fn test_join_backfills_avatar_from_identity_directory() {
        // given: alice was seen with an avatar before
        let mut state = ChatState::new();
        let first = state.create_session();
        state
            .register_user(first, nickname("alice"), Some("cat.png".to_string()))
            .unwrap();
        state.disconnect_session(first);

        // when: a new session joins as alice without an avatar
        let second = state.create_session();
        state
            .join_room(second, room("#geral"), nickname("alice"), None)
            .unwrap();

        // then:
        assert_eq!(
            state.session(second).unwrap().avatar,
            Some("cat.png".to_string())
        );
    }

    #[test]
    fn test_join_with_avatar_overwrites_identity_directory() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .register_user(id, nickname("alice"), Some("old.png".to_string()))
            .unwrap();

        // when:
        state
            .join_room(id, room("#geral"), nickname("alice"), Some("new.png".to_string()))
            .unwrap();

        // then: last write wins
        assert_eq!(state.recall_avatar(&nickname("alice")), Some("new.png"));
    }

    #[test]
    fn test_rejoining_same_room_announces_departure() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // when:
        let transition = state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // then: membership is restored and the old room shows one departure
        let departed = transition.departed.unwrap();
        assert_eq!(departed.room, room("#geral"));
        assert_eq!(state.room_members(&room("#geral")), vec![id]);
        assert_consistent(&state);
    }

    #[test]
    fn test_record_message_appends_to_current_room() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // when:
        let transition = state
            .record_message(id, content("hi"), Timestamp::new(1000))
            .unwrap()
            .unwrap();

        // then:
        assert_eq!(transition.room, room("#geral"));
        assert_eq!(transition.message.nickname.as_str(), "alice");
        assert_eq!(transition.message.content.as_str(), "hi");
        let history = state.recent_history(&room("#geral"), HISTORY_LIMIT);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], transition.message);
    }

    #[test]
    fn test_record_message_without_room_is_ignored() {
        // given: registered but not in a room
        let mut state = ChatState::new();
        let id = state.create_session();
        state.register_user(id, nickname("alice"), None).unwrap();

        // when:
        let result = state.record_message(id, content("hi"), Timestamp::new(1000));

        // then:
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_record_message_for_unknown_session_fails() {
        // given:
        let mut state = ChatState::new();

        // when:
        let result =
            state.record_message(SessionId::new(7), content("hi"), Timestamp::new(1000));

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_history_is_bounded_to_limit_with_fifo_eviction() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // when: one more message than the limit
        for i in 0..=HISTORY_LIMIT {
            state
                .record_message(id, content(&format!("msg-{i}")), Timestamp::new(i as i64))
                .unwrap();
        }

        // then: length stays at the limit, the first message is gone,
        // the last one is present, order preserved
        let history = state.recent_history(&room("#geral"), HISTORY_LIMIT);
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].content.as_str(), "msg-1");
        assert_eq!(
            history[HISTORY_LIMIT - 1].content.as_str(),
            format!("msg-{HISTORY_LIMIT}")
        );
        for pair in history.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_recent_history_respects_smaller_limit() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();
        for i in 0..5 {
            state
                .record_message(id, content(&format!("msg-{i}")), Timestamp::new(i))
                .unwrap();
        }

        // when:
        let history = state.recent_history(&room("#geral"), 2);

        // then: the last two, most-recent-last
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content.as_str(), "msg-3");
        assert_eq!(history[1].content.as_str(), "msg-4");
    }

    #[test]
    fn test_disconnect_removes_membership_and_session() {
        // given:
        let mut state = ChatState::new();
        let alice = state.create_session();
        let bob = state.create_session();
        state
            .join_room(alice, room("#geral"), nickname("alice"), None)
            .unwrap();
        state
            .join_room(bob, room("#geral"), nickname("bob"), None)
            .unwrap();

        // when:
        let transition = state.disconnect_session(alice).unwrap();

        // then: exactly one departure, alice gone from room and registry
        assert_eq!(transition.departures.len(), 1);
        assert_eq!(transition.departures[0].room, room("#geral"));
        assert_eq!(transition.departures[0].announce, Some(nickname("alice")));
        assert_eq!(transition.all_users.len(), 1);
        assert_eq!(transition.all_users[0].nickname.as_str(), "bob");
        assert!(!state.room_members(&room("#geral")).contains(&alice));
        assert!(state.session(alice).is_none());
        assert_consistent(&state);
    }

    #[test]
    fn test_disconnect_without_nickname_announces_nothing() {
        // given: a session that never registered
        let mut state = ChatState::with_rooms(vec![room("#geral")]);
        let id = state.create_session();

        // when:
        let transition = state.disconnect_session(id).unwrap();

        // then:
        assert!(transition.departures.is_empty());
        assert!(transition.all_users.is_empty());
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();
        state.disconnect_session(id).unwrap();

        // when: disconnecting again
        let second = state.disconnect_session(id);

        // then: no observable effect
        assert!(second.is_none());
        assert_consistent(&state);
    }

    #[test]
    fn test_remove_absent_member_is_a_noop() {
        // given:
        let mut state = ChatState::with_rooms(vec![room("#geral")]);

        // when:
        state.remove_member(&room("#geral"), SessionId::new(42));
        state.remove_member(&room("#missing"), SessionId::new(42));

        // then: nothing panicked, nothing changed
        assert!(state.room_members(&room("#geral")).is_empty());
    }

    #[test]
    fn test_room_is_not_destroyed_when_it_becomes_empty() {
        // given:
        let mut state = ChatState::new();
        let id = state.create_session();
        state
            .join_room(id, room("#geral"), nickname("alice"), None)
            .unwrap();

        // when:
        state.disconnect_session(id).unwrap();

        // then: rooms are permanent once created
        assert_eq!(state.list_room_names(), vec!["#geral".to_string()]);
    }

    #[test]
    fn test_room_list_preserves_insertion_order() {
        // given:
        let mut state = ChatState::new();
        let a = state.create_session();
        let b = state.create_session();
        let c = state.create_session();

        // when: rooms created in a non-alphabetical order
        state
            .join_room(a, room("#zurich"), nickname("alice"), None)
            .unwrap();
        state
            .join_room(b, room("#amsterdam"), nickname("bob"), None)
            .unwrap();
        state
            .join_room(c, room("#madrid"), nickname("carol"), None)
            .unwrap();

        // then:
        assert_eq!(
            state.list_room_names(),
            vec![
                "#zurich".to_string(),
                "#amsterdam".to_string(),
                "#madrid".to_string()
            ]
        );
    }

    #[test]
    fn test_room_user_list_is_sorted_case_insensitively() {
        // given:
        let mut state = ChatState::new();
        let a = state.create_session();
        let b = state.create_session();
        let c = state.create_session();
        state
            .join_room(a, room("#geral"), nickname("Charlie"), None)
            .unwrap();
        state
            .join_room(b, room("#geral"), nickname("alice"), None)
            .unwrap();
        state
            .join_room(c, room("#geral"), nickname("Bob"), None)
            .unwrap();

        // when:
        let users = state.room_user_list(&room("#geral"));

        // then:
        let names: Vec<&str> = users.iter().map(|u| u.nickname.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_global_user_list_spans_rooms_and_skips_unregistered() {
        // given:
        let mut state = ChatState::new();
        let a = state.create_session();
        let b = state.create_session();
        let _unregistered = state.create_session();
        state
            .join_room(a, room("#geral"), nickname("bob"), None)
            .unwrap();
        state
            .join_room(b, room("#python"), nickname("Alice"), None)
            .unwrap();

        // when:
        let users = state.global_user_list();

        // then: sorted across rooms, sessions without a nickname excluded
        let names: Vec<&str> = users.iter().map(|u| u.nickname.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob"]);
    }

    #[test]
    fn test_global_user_list_deduplicates_by_nickname() {
        // given: two live sessions registered under the same nickname
        let mut state = ChatState::new();
        let a = state.create_session();
        let b = state.create_session();
        state.register_user(a, nickname("alice"), None).unwrap();
        state.register_user(b, nickname("alice"), None).unwrap();

        // when:
        let users = state.global_user_list();

        // then:
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_consistency_holds_across_a_join_leave_sequence() {
        // given:
        let mut state = ChatState::new();
        let ids: Vec<SessionId> = (0..4).map(|_| state.create_session()).collect();

        // when/then: every transition keeps membership consistent
        for (i, id) in ids.iter().enumerate() {
            state
                .join_room(*id, room("#geral"), nickname(&format!("user{i}")), None)
                .unwrap();
            assert_consistent(&state);
        }
        for (i, id) in ids.iter().enumerate() {
            state
                .join_room(*id, room("#python"), nickname(&format!("user{i}")), None)
                .unwrap();
            assert_consistent(&state);
        }
        for id in &ids {
            state.disconnect_session(*id);
            assert_consistent(&state);
        }
        assert_eq!(state.session_count(), 0);
    }
}
