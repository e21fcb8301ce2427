use std::sync::Arc;
use std::time::Duration;

use futures_channel::mpsc::UnboundedSender;
use log::debug;
use tokio::time::{self, MissedTickBehavior};

use crate::domain::events::Event;
use crate::services::session::LockedSession;
use crate::store::MessageStore;

/// How often the room directory is refreshed. Room-list latency matters
/// less than message latency, so this is the longer of the two cadences.
pub const DIRECTORY_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps `session.rooms` converging with the backend directory for the life
/// of the process. The fetched list replaces the previous snapshot verbatim.
/// A failed fetch keeps the previous snapshot and the next tick is the
/// retry; nothing is surfaced to the user.
///
/// Ticks are serialized: the next fetch is not issued until this one's
/// outcome has been applied, so responses cannot land out of order.
pub async fn room_directory_poller(
    store: Arc<dyn MessageStore>,
    session: LockedSession,
    event_sink: UnboundedSender<Event>,
    interval: Duration,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let rooms = match store.list_rooms().await {
            Ok(rooms) => rooms,
            Err(e) => {
                debug!("room directory fetch failed, keeping last snapshot: {e}");
                continue;
            }
        };

        session.lock().unwrap().replace_rooms(rooms.clone());
        if event_sink.unbounded_send(Event::RoomsUpdated(rooms)).is_err() {
            // The receiver is gone, the presentation layer has shut down.
            break;
        }
    }
}
