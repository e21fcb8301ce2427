use super::room::Room;

/// Pushed to the presentation layer whenever a poll or a selection changes
/// what should be on screen. Events carry full snapshots so the renderer
/// never has to reach back into session state mid-frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RoomsUpdated(Vec<Room>),
    RoomSelected(Room),
    MessagesUpdated { room: Room, messages: Vec<String> },
}
