//! UseCase: クライアント切断処理
//!
//! 接続が閉じたときに呼ばれます。
//! 1. すべてのボード購読を解除する
//! 2. 送信チャンネルを破棄する
//! 3. プレゼンスが記録されていれば、そのボードの残りの購読者に offline を送る
//!
//! 何度呼んでも安全です。プレゼンスを通知していない接続や、
//! 二度目の切断ではオフライン通知は出ません。

use std::sync::Arc;

use crate::domain::{
    BoardEvent, BoardHubRepository, BoardId, ConnectionId, DeliveryReport, PresenceEntry,
    PresenceStatus,
};

use super::broadcast_event::BroadcastEventUseCase;

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisconnectOutcome {
    /// 購読を解除したボード
    pub left_boards: Vec<BoardId>,
    /// 送信チャンネルが登録されていたか
    pub was_connected: bool,
    /// 削除したプレゼンス
    pub presence: Option<PresenceEntry>,
    /// offline イベントの配信件数（送った場合のみ）
    pub offline_report: Option<DeliveryReport>,
}

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardHubRepository>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(repository: Arc<dyn BoardHubRepository>) -> Self {
        Self { repository }
    }

    /// 切断処理を実行
    pub async fn execute(&self, connection_id: &ConnectionId) -> DisconnectOutcome {
        // 1. 購読をすべて解除
        let left_boards = self.repository.unsubscribe_all(connection_id).await;

        // 2. 送信チャンネルを破棄
        let was_connected = self.repository.remove_connection(connection_id).await;

        // 3. プレゼンスがあれば offline を通知
        let presence = self.repository.take_presence(connection_id).await;
        let offline_report = match &presence {
            Some(entry) => {
                let event = BoardEvent::presence(entry.user_id.clone(), PresenceStatus::Offline);
                match BroadcastEventUseCase::new(self.repository.clone())
                    .execute(&entry.board_id, &event, None)
                    .await
                {
                    Ok(report) => Some(report),
                    Err(e) => {
                        tracing::warn!(
                            "Failed to announce offline for connection '{}': {}",
                            connection_id,
                            e
                        );
                        None
                    }
                }
            }
            None => None,
        };

        tracing::info!(
            "Connection '{}' disconnected (left {} board(s))",
            connection_id,
            left_boards.len()
        );

        DisconnectOutcome {
            left_boards,
            was_connected,
            presence,
            offline_report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::UserId,
        usecase::{
            AnnouncePresenceUseCase, SubscribeBoardUseCase,
            test_support::{board, connect, create_test_repository, drain},
        },
    };

    #[tokio::test]
    async fn test_disconnect_emits_single_offline_event() {
        // テスト項目: X が u1 として alpha でオンライン通知後に切断すると、
        //            alpha の購読者に offline が 1 回だけ届き、二度目の切断では何も届かない
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let announce = AnnouncePresenceUseCase::new(repository.clone());
        let usecase = DisconnectClientUseCase::new(repository.clone());
        let (x, _rx_x) = connect(&repository).await;
        let (y, mut rx_y) = connect(&repository).await;
        subscribe.subscribe(&x, &board("alpha")).await;
        subscribe.subscribe(&y, &board("alpha")).await;
        let u1 = UserId::new("u1".to_string()).unwrap();
        announce.execute(&x, &u1, &board("alpha")).await.unwrap();

        let online = drain(&mut rx_y);
        assert_eq!(online.len(), 1);
        assert_eq!(online[0]["payload"]["status"], "online");

        // when (操作):
        let first = usecase.execute(&x).await;
        let second = usecase.execute(&x).await;

        // then (期待する結果):
        let frames = drain(&mut rx_y);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "user-presence");
        assert_eq!(frames[0]["boardId"], "alpha");
        assert_eq!(frames[0]["payload"]["userId"], "u1");
        assert_eq!(frames[0]["payload"]["status"], "offline");

        assert!(first.was_connected);
        assert_eq!(first.left_boards, vec![board("alpha")]);
        assert_eq!(first.offline_report.unwrap().delivered, 1);

        assert_eq!(second, DisconnectOutcome::default());
    }

    #[tokio::test]
    async fn test_disconnect_without_presence_emits_nothing() {
        // テスト項目: オンライン通知をしていない接続の切断ではイベントが出ない
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let usecase = DisconnectClientUseCase::new(repository.clone());
        let (x, _rx_x) = connect(&repository).await;
        let (y, mut rx_y) = connect(&repository).await;
        subscribe.subscribe(&x, &board("alpha")).await;
        subscribe.subscribe(&y, &board("alpha")).await;

        // when (操作):
        let outcome = usecase.execute(&x).await;

        // then (期待する結果):
        assert!(outcome.presence.is_none());
        assert!(outcome.offline_report.is_none());
        assert!(drain(&mut rx_y).is_empty());
        assert_eq!(subscribe.subscribers_of(&board("alpha")).await, vec![y]);
    }

    #[tokio::test]
    async fn test_disconnect_unsubscribes_every_board() {
        // テスト項目: 切断後はどのボードの購読者にも含まれない
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let usecase = DisconnectClientUseCase::new(repository.clone());
        let (x, _rx_x) = connect(&repository).await;
        for name in ["alpha", "beta", "gamma"] {
            subscribe.subscribe(&x, &board(name)).await;
        }

        // when (操作):
        let outcome = usecase.execute(&x).await;

        // then (期待する結果):
        assert_eq!(outcome.left_boards.len(), 3);
        for name in ["alpha", "beta", "gamma"] {
            assert!(!subscribe.subscribers_of(&board(name)).await.contains(&x));
        }
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_offline_goes_to_presence_board_only() {
        // テスト項目: offline は最後に通知したボードにだけ送られる
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let announce = AnnouncePresenceUseCase::new(repository.clone());
        let usecase = DisconnectClientUseCase::new(repository.clone());
        let (x, _rx_x) = connect(&repository).await;
        let (alpha_watcher, mut rx_alpha) = connect(&repository).await;
        let (beta_watcher, mut rx_beta) = connect(&repository).await;
        subscribe.subscribe(&alpha_watcher, &board("alpha")).await;
        subscribe.subscribe(&beta_watcher, &board("beta")).await;
        let u1 = UserId::new("u1".to_string()).unwrap();
        announce.execute(&x, &u1, &board("alpha")).await.unwrap();
        announce.execute(&x, &u1, &board("beta")).await.unwrap();
        drain(&mut rx_alpha);
        drain(&mut rx_beta);

        // when (操作):
        usecase.execute(&x).await;

        // then (期待する結果):
        assert!(drain(&mut rx_alpha).is_empty());
        let frames = drain(&mut rx_beta);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["payload"]["status"], "offline");
    }
}
