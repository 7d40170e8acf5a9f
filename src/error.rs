use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionPrepError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("プロジェクトが指定されていません。`--project` か `caption-prep config --set-project NAME` で指定してください")]
    MissingProject,

    #[error("データセットの読み込みに失敗: {0}")]
    LoadFailed(String),

    #[error("サーバーURLが不正です: {0}")]
    InvalidServerUrl(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] caption_prep_common::Error),
}

pub type Result<T> = std::result::Result<T, CaptionPrepError>;
