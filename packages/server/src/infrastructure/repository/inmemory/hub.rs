//! InMemory Board Hub Repository 実装
//!
//! ドメイン層が定義する BoardHubRepository trait の具体的な実装。
//! 接続ごとの送信キュー、購読レジストリ、プレゼンスを 1 つの Mutex で保護します。
//! すべての操作がこのロックの下で完結するため、ハブへの変更は常に直列化されます。
//! 送信キューは容量付きで、配信は決して待ちません。キューが一杯の購読者は
//! そのイベントを取りこぼします（失敗として数えるだけで、再送はしません）。
//! プロセス再起動で状態は失われます（クライアントは再接続時に再購読します）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{
    Mutex,
    mpsc::{Sender, error::TrySendError},
};

use crate::domain::{
    BoardHubRepository, BoardId, ConnectionId, ConnectionRegistry, DeliveryReport, PresenceEntry,
    PresenceTracker, RepositoryError, Subscription, UserId,
};

#[derive(Default)]
struct HubState {
    /// 接続ごとの送信キュー（WebSocket 書き込みタスクへ）
    channels: HashMap<ConnectionId, Sender<String>>,
    registry: ConnectionRegistry,
    presence: PresenceTracker,
}

/// インメモリ Board Hub Repository 実装
#[derive(Default)]
pub struct InMemoryBoardHubRepository {
    state: Mutex<HubState>,
}

impl InMemoryBoardHubRepository {
    /// 新しい InMemoryBoardHubRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardHubRepository for InMemoryBoardHubRepository {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: Sender<String>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        if state.channels.contains_key(&connection_id) {
            return Err(RepositoryError::ConnectionAlreadyRegistered(
                connection_id.into_string(),
            ));
        }
        state.channels.insert(connection_id, sender);
        Ok(())
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        state.channels.remove(connection_id).is_some()
    }

    async fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        let state = self.state.lock().await;
        state.channels.contains_key(connection_id)
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.channels.len()
    }

    async fn subscribe(&self, subscription: &Subscription) -> bool {
        let mut state = self.state.lock().await;
        state.registry.subscribe(subscription)
    }

    async fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut state = self.state.lock().await;
        state.registry.unsubscribe(subscription)
    }

    async fn unsubscribe_all(&self, connection_id: &ConnectionId) -> Vec<BoardId> {
        let mut state = self.state.lock().await;
        state.registry.unsubscribe_all(connection_id)
    }

    async fn subscribers_of(&self, board_id: &BoardId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.registry.subscribers_of(board_id)
    }

    async fn record_presence(
        &self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        board_id: &BoardId,
    ) -> Option<PresenceEntry> {
        let mut state = self.state.lock().await;
        state
            .presence
            .announce_online(connection_id.clone(), user_id.clone(), board_id.clone())
    }

    async fn take_presence(&self, connection_id: &ConnectionId) -> Option<PresenceEntry> {
        let mut state = self.state.lock().await;
        state.presence.take(connection_id)
    }

    async fn online_on(&self, board_id: &BoardId) -> Vec<PresenceEntry> {
        let state = self.state.lock().await;
        state.presence.online_on(board_id)
    }

    async fn deliver(
        &self,
        board_id: &BoardId,
        payload: String,
        except: Option<ConnectionId>,
    ) -> DeliveryReport {
        let state = self.state.lock().await;
        let mut report = DeliveryReport::default();

        for target in state.registry.subscribers_of(board_id) {
            if except.as_ref() == Some(&target) {
                continue;
            }
            let Some(sender) = state.channels.get(&target) else {
                tracing::debug!(
                    "Connection '{}' is subscribed to board '{}' but has no channel",
                    target,
                    board_id
                );
                report.failed += 1;
                continue;
            };
            match sender.try_send(payload.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Dropped event for connection '{}' on board '{}': outbound queue full",
                        target,
                        board_id
                    );
                    report.failed += 1;
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        "Failed to deliver to connection '{}' on board '{}': channel closed",
                        target,
                        board_id
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }
}
