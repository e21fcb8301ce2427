pub mod http;

pub use http::HttpStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::room::Room;

/// The backend collaborators, consumed purely through their request
/// contract: the room directory answers "what rooms currently exist", the
/// message store answers "what messages exist for room R" and accepts
/// "append M to room R".
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    async fn list_messages(&self, room: &Room) -> Result<Vec<String>>;

    async fn send(&self, room: &Room, message: &str) -> Result<()>;
}
