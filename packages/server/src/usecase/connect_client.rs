//! UseCase: クライアント接続処理
//!
//! WebSocket を受け付けた直後に、その接続の送信キューをハブに登録します。
//! 接続 ID はサーバ側で生成するため、重複は実質的に起こりませんが、
//! 起きた場合は登録を拒否します。

use std::sync::Arc;

use tokio::sync::mpsc::Sender;

use crate::domain::{BoardHubRepository, ConnectionId, RepositoryError, Timestamp};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardHubRepository>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(repository: Arc<dyn BoardHubRepository>) -> Self {
        Self { repository }
    }

    /// 接続登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: Sender<String>,
    ) -> Result<Timestamp, ConnectError> {
        self.repository
            .register_connection(connection_id, sender)
            .await
            .map_err(|e| match e {
                RepositoryError::ConnectionAlreadyRegistered(id) => {
                    ConnectError::DuplicateConnectionId(id)
                }
            })?;
        Ok(Timestamp::now())
    }
}
