//! UseCase: オンライン通知
//!
//! 接続がどのユーザーとして、どのボードを見ているかを記録し、
//! そのボードの購読者に online のプレゼンスイベントを送ります。
//!
//! 接続ごとのエントリは 1 件だけで、再通知は上書きです。
//! 離脱せずに別のボードで通知した場合、前のボードにはオフライン通知を出しません
//! （前のボードから見たプレゼンスは古いまま残ります）。
//! 同じ内容の再通知でも online イベントは再送されます。

use std::sync::Arc;

use crate::domain::{
    BoardEvent, BoardHubRepository, BoardId, ConnectionId, DeliveryReport, PresenceStatus, UserId,
};

use super::{broadcast_event::BroadcastEventUseCase, error::BroadcastError};

/// オンライン通知のユースケース
pub struct AnnouncePresenceUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardHubRepository>,
}

impl AnnouncePresenceUseCase {
    /// 新しい AnnouncePresenceUseCase を作成
    pub fn new(repository: Arc<dyn BoardHubRepository>) -> Self {
        Self { repository }
    }

    /// オンライン通知を実行
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryReport)` - online イベントの配信件数
    /// * `Err(BroadcastError)` - イベントを JSON にできなかった（記録は済んでいる）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        board_id: &BoardId,
    ) -> Result<DeliveryReport, BroadcastError> {
        // 1. プレゼンスを記録（上書き）
        if let Some(previous) = self
            .repository
            .record_presence(connection_id, user_id, board_id)
            .await
            && &previous.board_id != board_id
        {
            tracing::debug!(
                "Connection '{}' moved presence from board '{}' to '{}' without leaving",
                connection_id,
                previous.board_id,
                board_id
            );
        }

        // 2. online イベントを送信
        let event = BoardEvent::presence(user_id.clone(), PresenceStatus::Online);
        BroadcastEventUseCase::new(self.repository.clone())
            .execute(board_id, &event, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        SubscribeBoardUseCase,
        test_support::{board, connect, create_test_repository, drain},
    };

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_announce_online_notifies_board_subscribers() {
        // テスト項目: オンライン通知はボードの購読者全員（通知した本人も含む）に届く
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let usecase = AnnouncePresenceUseCase::new(repository.clone());
        let (x, mut rx_x) = connect(&repository).await;
        let (y, mut rx_y) = connect(&repository).await;
        let (z, mut rx_z) = connect(&repository).await;
        subscribe.subscribe(&x, &board("alpha")).await;
        subscribe.subscribe(&y, &board("alpha")).await;
        subscribe.subscribe(&z, &board("beta")).await;

        // when (操作):
        let report = usecase
            .execute(&x, &user("u1"), &board("alpha"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        for rx in [&mut rx_x, &mut rx_y] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0]["type"], "user-presence");
            assert_eq!(frames[0]["payload"]["userId"], "u1");
            assert_eq!(frames[0]["payload"]["status"], "online");
        }
        assert!(drain(&mut rx_z).is_empty());
        assert_eq!(repository.online_on(&board("alpha")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_reannounce_on_other_board_leaves_no_offline_event() {
        // テスト項目: 離脱せずに別ボードで再通知しても、前のボードにオフライン通知は出ない
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let usecase = AnnouncePresenceUseCase::new(repository.clone());
        let (x, _rx_x) = connect(&repository).await;
        let (watcher, mut rx_watcher) = connect(&repository).await;
        subscribe.subscribe(&watcher, &board("alpha")).await;
        usecase
            .execute(&x, &user("u1"), &board("alpha"))
            .await
            .unwrap();
        drain(&mut rx_watcher);

        // when (操作):
        usecase
            .execute(&x, &user("u1"), &board("beta"))
            .await
            .unwrap();

        // then (期待する結果): alpha の購読者には何も届かず、エントリは beta に移る
        assert!(drain(&mut rx_watcher).is_empty());
        assert!(repository.online_on(&board("alpha")).await.is_empty());
        assert_eq!(repository.online_on(&board("beta")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_announce_twice_emits_two_online_events() {
        // テスト項目: 同じ内容の再通知でも online イベントは再送される
        // given (前提条件):
        let repository = create_test_repository();
        let subscribe = SubscribeBoardUseCase::new(repository.clone());
        let usecase = AnnouncePresenceUseCase::new(repository.clone());
        let (x, mut rx_x) = connect(&repository).await;
        subscribe.subscribe(&x, &board("alpha")).await;

        // when (操作):
        usecase.execute(&x, &user("u1"), &board("alpha")).await.unwrap();
        usecase.execute(&x, &user("u1"), &board("alpha")).await.unwrap();

        // then (期待する結果):
        assert_eq!(drain(&mut rx_x).len(), 2);
        assert_eq!(repository.online_on(&board("alpha")).await.len(), 1);
    }
}
