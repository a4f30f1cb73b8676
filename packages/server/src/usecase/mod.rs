//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（WebSocket / HTTP ハンドラ）から呼び出され、Domain 層を操作します。

pub mod announce_presence;
pub mod broadcast_event;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod subscribe_board;

pub use announce_presence::AnnouncePresenceUseCase;
pub use broadcast_event::BroadcastEventUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::{DisconnectClientUseCase, DisconnectOutcome};
pub use error::{BroadcastError, ConnectError};
pub use subscribe_board::SubscribeBoardUseCase;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::{
        domain::{BoardHubRepository, BoardId, ConnectionId, ConnectionIdFactory},
        infrastructure::repository::InMemoryBoardHubRepository,
    };

    pub fn create_test_repository() -> Arc<InMemoryBoardHubRepository> {
        Arc::new(InMemoryBoardHubRepository::new())
    }

    pub fn board(id: &str) -> BoardId {
        BoardId::new(id.to_string()).unwrap()
    }

    /// 接続を登録し、その受信側を返す
    pub async fn connect(
        repository: &Arc<InMemoryBoardHubRepository>,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(64);
        let id = ConnectionIdFactory::generate();
        repository
            .register_connection(id.clone(), tx)
            .await
            .unwrap();
        (id, rx)
    }

    /// 受信済みのフレームをすべて JSON として取り出す
    pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<serde_json::Value> {
        let mut frames = Vec::new();
        while let Ok(raw) = rx.try_recv() {
            frames.push(serde_json::from_str(&raw).unwrap());
        }
        frames
    }
}
