//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID がすでに登録されている
    #[error("Connection '{0}' is already registered")]
    DuplicateConnectionId(String),
}

/// ブロードキャストのエラー（配信失敗ではなく、送信前の失敗のみ）
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    /// イベントを JSON にできなかった
    #[error("Failed to encode board event: {0}")]
    Encode(String),
}
