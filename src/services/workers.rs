use std::sync::Arc;
use std::time::Duration;

use futures_channel::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::domain::{events::Event, room::Room};
use crate::handlers::{messages::message_stream_poller, rooms::room_directory_poller};
use crate::services::session::LockedSession;
use crate::store::MessageStore;

/// Starts the directory poller. Runs from application start and never
/// stops while the process is alive, whether or not a room is selected.
pub fn spawn_directory_poller(
    store: Arc<dyn MessageStore>,
    session: LockedSession,
    event_sink: UnboundedSender<Event>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(room_directory_poller(store, session, event_sink, interval))
}

/// Starts a message poller for one `(room, epoch)` selection. The caller
/// holds the handle and aborts it when the selection changes.
pub fn start_message_poller(
    room: Room,
    epoch: u64,
    store: Arc<dyn MessageStore>,
    session: LockedSession,
    event_sink: UnboundedSender<Event>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(message_stream_poller(
        room, epoch, store, session, event_sink, interval,
    ))
}
