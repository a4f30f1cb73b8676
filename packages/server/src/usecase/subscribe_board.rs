//! UseCase: ボード購読・購読解除
//!
//! どちらの操作も冪等で、失敗しません。
//! 未知のボード ID も有効です（購読者集合は必要になった時点で作られます）。

use std::sync::Arc;

use crate::domain::{BoardHubRepository, BoardId, ConnectionId, Subscription};

/// ボード購読のユースケース
pub struct SubscribeBoardUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardHubRepository>,
}

impl SubscribeBoardUseCase {
    /// 新しい SubscribeBoardUseCase を作成
    pub fn new(repository: Arc<dyn BoardHubRepository>) -> Self {
        Self { repository }
    }

    /// 購読を追加する。すでに購読済みなら何もしない。
    ///
    /// # Returns
    ///
    /// 新しく追加された場合は `true`
    pub async fn subscribe(&self, connection_id: &ConnectionId, board_id: &BoardId) -> bool {
        let subscription = Subscription::new(connection_id.clone(), board_id.clone());
        let added = self.repository.subscribe(&subscription).await;
        if added {
            tracing::info!("Connection '{}' joined board '{}'", connection_id, board_id);
        } else {
            tracing::debug!(
                "Connection '{}' is already subscribed to board '{}'",
                connection_id,
                board_id
            );
        }
        added
    }

    /// 購読を解除する。購読していなければ何もしない。
    ///
    /// プレゼンスには触れません（離脱してもオフライン通知は出ません）。
    pub async fn unsubscribe(&self, connection_id: &ConnectionId, board_id: &BoardId) -> bool {
        let subscription = Subscription::new(connection_id.clone(), board_id.clone());
        let removed = self.repository.unsubscribe(&subscription).await;
        if removed {
            tracing::info!("Connection '{}' left board '{}'", connection_id, board_id);
        }
        removed
    }

    /// ボードの現在の購読者（送信者自身も含む）
    pub async fn subscribers_of(&self, board_id: &BoardId) -> Vec<ConnectionId> {
        self.repository.subscribers_of(board_id).await
    }
}
