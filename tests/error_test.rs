//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use caption_prep::config::Config;
use caption_prep::error::CaptionPrepError;
use tempfile::tempdir;

/// CaptionPrepErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CaptionPrepError::Config("テスト設定エラー".to_string()),
        CaptionPrepError::MissingProject,
        CaptionPrepError::LoadFailed("Dataset path does not exist".to_string()),
        CaptionPrepError::InvalidServerUrl("ftp://host".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingProjectエラーのメッセージ確認
#[test]
fn test_missing_project_message() {
    let display = format!("{}", CaptionPrepError::MissingProject);

    assert!(display.contains("プロジェクト"));
    assert!(display.contains("caption-prep config"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = CaptionPrepError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CaptionPrepError = io_err.into();

    assert!(matches!(err, CaptionPrepError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: CaptionPrepError = json_err.into();

    assert!(matches!(err, CaptionPrepError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = caption_prep_common::Error::Backend {
        status: 404,
        message: "Project not found".to_string(),
    };
    let err: CaptionPrepError = common_err.into();

    assert!(matches!(err, CaptionPrepError::Common(_)));
    let display = format!("{}", err);
    assert!(display.contains("Project not found"));
    assert!(display.contains("404"));
}

/// 壊れた設定ファイル
#[test]
fn test_load_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(CaptionPrepError::JsonParse(_))));
}
