use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_channel::mpsc::UnboundedSender;
use log::debug;
use tokio::task::JoinHandle;

use crate::domain::{events::Event, room::Room};
use crate::handlers::messages::MESSAGE_POLL_INTERVAL;
use crate::services::workers;
use crate::store::MessageStore;

pub type LockedSession = Arc<Mutex<Session>>;

/// The client's view of the backend plus the in-progress compose buffer.
/// Every collection is a snapshot: polls replace wholesale, nothing merges.
///
/// `epoch` counts room selections. A message poller captures the epoch it
/// was spawned under and snapshots tagged with an older epoch are refused,
/// so a poller that outlives its room's selection cannot write stale
/// history under the new room's header.
pub struct Session {
    rooms: Vec<Room>,
    selected: Option<Room>,
    messages: Vec<String>,
    compose: String,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Session {
            rooms: Vec::new(),
            selected: None,
            messages: Vec::new(),
            compose: String::new(),
            epoch: 0,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn selected(&self) -> Option<&Room> {
        self.selected.as_ref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn compose(&self) -> &str {
        &self.compose
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Latest directory snapshot, trusted verbatim. No merge, no dedup.
    pub fn replace_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    /// Marks `room` as the current selection and clears the message view
    /// before any fetch for it can resolve. Returns the new epoch for the
    /// poller that will serve this selection.
    pub fn select(&mut self, room: Room) -> u64 {
        self.selected = Some(room);
        self.messages.clear();
        self.epoch += 1;
        self.epoch
    }

    /// Applies a fetched message snapshot if it belongs to the current
    /// selection. Returns false for a stale epoch, in which case nothing
    /// changes and the caller should stop polling.
    pub fn apply_messages(&mut self, epoch: u64, messages: Vec<String>) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.messages = messages;
        true
    }

    pub fn set_compose(&mut self, text: &str) {
        self.compose = text.into();
    }

    /// Validates and takes the outgoing payload for a send. Returns `None`
    /// with no state change when the trimmed buffer is empty or no room is
    /// selected. Otherwise clears the compose buffer and hands back the
    /// target room with the trimmed payload; the clear happens here, before
    /// the request is even dispatched, and is never conditioned on its
    /// outcome.
    pub fn take_outgoing(&mut self) -> Option<(Room, String)> {
        let payload = self.compose.trim();
        if payload.is_empty() {
            return None;
        }
        let room = self.selected.clone()?;
        let payload = payload.to_string();
        self.compose.clear();
        Some((room, payload))
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Owns the shared session plus the message poller lifecycle. Exactly one
/// message poller is live at a time; selecting a room tears the previous
/// one down before the replacement starts.
pub struct SessionHandle {
    session: LockedSession,
    store: Arc<dyn MessageStore>,
    event_sink: UnboundedSender<Event>,
    poller: Option<JoinHandle<()>>,
    poll_interval: Duration,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn MessageStore>, event_sink: UnboundedSender<Event>) -> Self {
        SessionHandle {
            session: Arc::new(Mutex::new(Session::new())),
            store,
            event_sink,
            poller: None,
            poll_interval: MESSAGE_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn session(&self) -> LockedSession {
        self.session.clone()
    }

    /// Selects or implicitly creates the named room. Joining a listed room
    /// and typing a brand new name are the same operation; only an
    /// empty-after-trimming name is rejected, with no state change. The
    /// previous poller is aborted before the new one is spawned.
    pub fn select_room(&mut self, raw: &str) -> bool {
        let Some(room) = Room::parse(raw) else {
            debug!("rejected empty room name");
            return false;
        };

        let epoch = self.session.lock().unwrap().select(room.clone());
        if let Some(old) = self.poller.take() {
            old.abort();
        }
        let _ = self
            .event_sink
            .unbounded_send(Event::RoomSelected(room.clone()));

        self.poller = Some(workers::start_message_poller(
            room,
            epoch,
            self.store.clone(),
            self.session.clone(),
            self.event_sink.clone(),
            self.poll_interval,
        ));
        true
    }

    pub fn set_compose(&mut self, text: &str) {
        self.session.lock().unwrap().set_compose(text);
    }

    /// Fire-and-forget send of the compose buffer to the selected room.
    /// Returns false when the preconditions fail (nothing selected, or the
    /// buffer trims to empty) without any network call. A dispatched
    /// request that fails is logged and otherwise indistinguishable from a
    /// message that has not shown up in a poll yet; there is no retry and
    /// no local echo.
    pub fn send_message(&mut self) -> bool {
        let Some((room, payload)) = self.session.lock().unwrap().take_outgoing() else {
            return false;
        };

        let store = self.store.clone();
        tokio::spawn(async move {
            if let Err(e) = store.send(&room, &payload).await {
                debug!("send to {room} failed: {e}");
            }
        });
        true
    }
}
