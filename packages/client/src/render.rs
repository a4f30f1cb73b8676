//! One-line rendering of frames pushed by the hub.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Render a raw text frame for the terminal.
pub fn render_frame(raw: &str) -> String {
    let Ok(frame) = serde_json::from_str::<Value>(raw) else {
        return format!("? {raw}");
    };
    let kind = frame["type"].as_str().unwrap_or("unknown");

    match kind {
        "connected" => format!(
            "* connected as {}",
            frame["connectionId"].as_str().unwrap_or("?")
        ),
        "error" => format!("! {}", frame["message"].as_str().unwrap_or("error")),
        _ => {
            let board = frame["boardId"].as_str().unwrap_or("?");
            let time = frame["sentAt"]
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            format!("{time} [{board}] {}", describe_event(kind, &frame["payload"]))
        }
    }
}

fn describe_event(kind: &str, payload: &Value) -> String {
    let field = |name: &str| payload[name].as_str().unwrap_or("?").to_string();

    match kind {
        "taskCreated" | "taskUpdated" => {
            format!("{kind}: {} ({})", field("title"), field("id"))
        }
        "taskMoved" => format!(
            "task {} moved {} -> {} at {}",
            field("taskId"),
            field("oldColumnId"),
            field("newColumnId"),
            payload["newOrder"]
        ),
        "taskDeleted" => format!("taskDeleted: {}", field("taskId")),
        "columnAdded" | "columnUpdated" => {
            format!("{kind}: {} ({})", field("name"), field("id"))
        }
        "columnDeleted" => format!("columnDeleted: {}", field("columnId")),
        "boardUpdated" => format!("boardUpdated: {}", field("name")),
        "boardDeleted" => "boardDeleted".to_string(),
        "memberRemoved" => format!("memberRemoved: {}", field("userId")),
        "memberRoleUpdated" => {
            format!("member {} is now {}", field("userId"), field("role"))
        }
        "user-presence" => format!("{} is {}", field("userId"), field("status")),
        other => format!("{other}: {payload}"),
    }
}
