//! Shared fixtures for integration tests.
//!
//! `TestServer` launches the real server binary on a fixed port and kills it
//! on drop. `WsClient` is a thin JSON-over-WebSocket client.

#![allow(dead_code)]

use std::{
    net::TcpStream,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream as TokioTcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub struct TestServer {
    child: Child,
    port: u16,
}

impl TestServer {
    /// Start the server binary and block until it accepts TCP connections.
    pub fn start(port: u16) -> Self {
        let child = Command::new(env!("CARGO_BIN_EXE_kanban-realtime-server"))
            .args(["--host", "127.0.0.1", "--port", &port.to_string()])
            .env("KANBAN_LOG", "warn")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn server binary");

        let deadline = Instant::now() + Duration::from_secs(10);
        while TcpStream::connect(("127.0.0.1", port)).is_err() {
            assert!(Instant::now() < deadline, "Server did not start on port {port}");
            thread::sleep(Duration::from_millis(50));
        }

        Self { child, port }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    /// Broadcast an event through the HTTP hook and return the response body.
    pub async fn broadcast(&self, board_id: &str, body: serde_json::Value) -> serde_json::Value {
        let response = reqwest::Client::new()
            .post(format!("{}/api/boards/{}/events", self.base_url(), board_id))
            .json(&body)
            .send()
            .await
            .expect("Failed to send broadcast request");
        assert_eq!(response.status(), 202);
        response.json().await.expect("Failed to parse JSON")
    }

    /// Poll the diagnostics endpoint until the board has `expected` subscribers.
    pub async fn wait_for_subscribers(&self, board_id: &str, expected: usize) {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let body: serde_json::Value = client
                .get(format!("{}/api/boards/{}/connections", self.base_url(), board_id))
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse JSON");
            let count = body["subscribers"].as_array().map_or(0, |a| a.len());
            if count == expected {
                return;
            }
            assert!(
                Instant::now() < deadline,
                "Board '{board_id}' has {count} subscribers, expected {expected}"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TokioTcpStream>>,
    pub connection_id: String,
}

impl WsClient {
    /// Connect and consume the initial `connected` frame.
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        let mut client = Self {
            stream,
            connection_id: String::new(),
        };
        let hello = client
            .next_json(Duration::from_secs(2))
            .await
            .expect("No connected frame");
        assert_eq!(hello["type"], "connected");
        client.connection_id = hello["connectionId"]
            .as_str()
            .expect("connectionId missing")
            .to_string();
        client
    }

    pub async fn send_json(&mut self, value: serde_json::Value) {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, board_id: &str) {
        self.send_json(serde_json::json!({"type": "join-board", "boardId": board_id}))
            .await;
    }

    pub async fn leave(&mut self, board_id: &str) {
        self.send_json(serde_json::json!({"type": "leave-board", "boardId": board_id}))
            .await;
    }

    pub async fn online(&mut self, user_id: &str, board_id: &str) {
        self.send_json(
            serde_json::json!({"type": "user-online", "userId": user_id, "boardId": board_id}),
        )
        .await;
    }

    /// Next text frame as JSON, or `None` if nothing arrives within `wait`.
    pub async fn next_json(&mut self, wait: Duration) -> Option<serde_json::Value> {
        loop {
            let frame = tokio::time::timeout(wait, self.stream.next()).await.ok()??;
            match frame.expect("WebSocket error") {
                Message::Text(text) => {
                    return Some(serde_json::from_str(&text).expect("Invalid JSON frame"));
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
