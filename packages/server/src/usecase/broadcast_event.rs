//! UseCase: ボードイベントのブロードキャスト
//!
//! 永続化が完了した変更を、そのボードの購読者全員に送ります。
//! 配信は fire-and-forget です。閉じた接続への送信失敗はログに残すだけで、
//! 呼び出し元には返しません（変更自体はすでに成功しているため）。
//! 配信の確認が必要な処理には使えません。取りこぼしたクライアントは
//! 再接続後にボード全体を取得し直します。

use std::sync::Arc;

use crate::{
    domain::{BoardEvent, BoardHubRepository, BoardId, ConnectionId, DeliveryReport, Timestamp},
    infrastructure::dto::websocket::BoardEventMessage,
};

use super::error::BroadcastError;

/// ブロードキャストのユースケース
pub struct BroadcastEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardHubRepository>,
}

impl BroadcastEventUseCase {
    /// 新しい BroadcastEventUseCase を作成
    pub fn new(repository: Arc<dyn BoardHubRepository>) -> Self {
        Self { repository }
    }

    /// ブロードキャストを実行
    ///
    /// # Arguments
    ///
    /// * `board_id` - 対象ボード
    /// * `event` - 送信するイベント
    /// * `except` - 送信しない接続（自分の変更のエコーを受け取りたくない呼び出し元向け）
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryReport)` - 配信件数（診断用）
    /// * `Err(BroadcastError)` - 送信前にイベントを JSON にできなかった
    pub async fn execute(
        &self,
        board_id: &BoardId,
        event: &BoardEvent,
        except: Option<ConnectionId>,
    ) -> Result<DeliveryReport, BroadcastError> {
        let message = BoardEventMessage {
            board_id: board_id.as_str(),
            event,
            sent_at: Timestamp::now().value(),
        };
        let payload =
            serde_json::to_string(&message).map_err(|e| BroadcastError::Encode(e.to_string()))?;

        let report = self.repository.deliver(board_id, payload, except).await;

        tracing::info!(
            "Broadcasted '{}' to board '{}' (delivered: {}, failed: {})",
            event.kind(),
            board_id,
            report.delivered,
            report.failed
        );

        Ok(report)
    }
}
