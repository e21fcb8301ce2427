use std::sync::Arc;
use std::time::Duration;

use futures_channel::mpsc::UnboundedSender;
use log::debug;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::{events::Event, room::Room};
use crate::services::session::LockedSession;
use crate::store::MessageStore;

/// How often the selected room's history is refreshed. Shorter than the
/// directory cadence: message latency is what a responder actually feels.
pub const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polls one room's message history until aborted or until its epoch goes
/// stale. The epoch is captured at selection time; a snapshot fetched for a
/// room that has since been deselected fails the epoch check and is dropped
/// rather than applied, so this worker can never clobber a newer room's
/// view. The first fetch is issued immediately, not after one interval.
///
/// Fetch failures keep the previous snapshot; the next tick retries. Ticks
/// are serialized, the next fetch waits for this one's outcome.
pub async fn message_stream_poller(
    room: Room,
    epoch: u64,
    store: Arc<dyn MessageStore>,
    session: LockedSession,
    event_sink: UnboundedSender<Event>,
    interval: Duration,
) {
    debug!("message poller starting for room: {room}");
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    'poll: loop {
        ticker.tick().await;

        let messages = match store.list_messages(&room).await {
            Ok(messages) => messages,
            Err(e) => {
                debug!("message fetch for {room} failed, keeping last snapshot: {e}");
                continue 'poll;
            }
        };

        let applied = session
            .lock()
            .unwrap()
            .apply_messages(epoch, messages.clone());
        if !applied {
            debug!("message poller for {room} went stale, exiting");
            break 'poll;
        }

        let update = Event::MessagesUpdated {
            room: room.clone(),
            messages,
        };
        if event_sink.unbounded_send(update).is_err() {
            break 'poll;
        }
    }
}
