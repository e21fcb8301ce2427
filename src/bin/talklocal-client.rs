use std::sync::Arc;

use futures_channel::mpsc::unbounded;
use futures_util::StreamExt;
use log::{info, warn};
use talklocal::{
    domain::{events::Event, room::Room},
    handlers::rooms::DIRECTORY_POLL_INTERVAL,
    services::{
        session::{LockedSession, SessionHandle},
        workers,
    },
    store::HttpStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};

fn getenv(name: &str) -> String {
    match std::env::var(name) {
        Ok(var) => var,
        _ => "".to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();
    let mut addr = getenv("TALKLOCAL_STORE_ADDR");
    if addr.is_empty() {
        addr = "http://localhost:9001".to_string();
        warn!("Could not find TALKLOCAL_STORE_ADDR environment variable. Falling back to {addr}.");
    }
    info!("Using message store at: {addr}");

    let store = Arc::new(HttpStore::new(addr));
    let (event_sink, event_source) = unbounded::<Event>();
    let mut handle = SessionHandle::new(store.clone(), event_sink.clone());

    workers::spawn_directory_poller(
        store,
        handle.session(),
        event_sink,
        DIRECTORY_POLL_INTERVAL,
    );
    tokio::spawn(render(handle.session(), event_source));

    println!("talklocal: /join <room> to pick or create a room, /rooms to list, anything else sends.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(name) = line.strip_prefix("/join ") {
            if !handle.select_room(name) {
                println!("room name cannot be empty");
            }
        } else if line.trim() == "/rooms" {
            print_rooms(handle.session().lock().unwrap().rooms());
        } else {
            handle.set_compose(&line);
            handle.send_message();
        }
    }

    Ok(())
}

/// Drains snapshot events and reprints whatever changed. Repeated identical
/// snapshots (the common case under polling) are skipped.
async fn render(
    session: LockedSession,
    mut event_source: futures_channel::mpsc::UnboundedReceiver<Event>,
) {
    let mut last_rooms: Vec<Room> = Vec::new();
    let mut last_messages: Vec<String> = Vec::new();

    while let Some(event) = event_source.next().await {
        match event {
            Event::RoomsUpdated(rooms) => {
                if rooms == last_rooms {
                    continue;
                }
                // Only announce the directory while no room is on screen.
                if session.lock().unwrap().selected().is_none() {
                    print_rooms(&rooms);
                }
                last_rooms = rooms;
            }
            Event::RoomSelected(room) => {
                last_messages.clear();
                println!("-- chatting in room: {room} --");
            }
            Event::MessagesUpdated { room, messages } => {
                if messages == last_messages {
                    continue;
                }
                println!("-- {room} --");
                if messages.is_empty() {
                    println!("(no messages yet)");
                }
                for msg in &messages {
                    println!("{msg}");
                }
                last_messages = messages;
            }
        }
    }
}

fn print_rooms(rooms: &[Room]) {
    if rooms.is_empty() {
        println!("no rooms found, /join <name> creates one");
        return;
    }
    println!("available rooms:");
    for room in rooms {
        println!("  {room}");
    }
}
