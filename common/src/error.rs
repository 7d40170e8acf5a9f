//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 入力不足など、通信前に検出したエラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// リクエスト送信・接続の失敗
    #[error("Transport error: {0}")]
    Transport(String),

    /// バックエンドが非成功ステータスを返した
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// レスポンス本文が想定外
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// ユーザーに見せるメッセージ
    ///
    /// バックエンドのエラーは `error` フィールドの文言をそのまま使い、
    /// それ以外は `fallback` を返す。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
