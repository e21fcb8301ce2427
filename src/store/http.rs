use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use super::MessageStore;
use crate::domain::room::Room;

#[derive(Serialize)]
struct SendBody {
    message: String,
}

/// HTTP client for a backend node on the local network. The base address is
/// fixed at deploy time, e.g. `http://localhost:9001`.
#[derive(Clone)]
pub struct HttpStore {
    base: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessageStore for HttpStore {
    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let names: Vec<String> = self
            .client
            .get(format!("{}/available-rooms", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(names.iter().map(|name| Room::from(name.as_str())).collect())
    }

    async fn list_messages(&self, room: &Room) -> Result<Vec<String>> {
        let messages = self
            .client
            .get(format!("{}/messages", self.base))
            .query(&[("room", room.name.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(messages)
    }

    async fn send(&self, room: &Room, message: &str) -> Result<()> {
        self.client
            .post(format!("{}/send", self.base))
            .query(&[("room", room.name.as_str())])
            .json(&SendBody {
                message: message.into(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
