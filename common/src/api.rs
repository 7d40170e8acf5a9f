//! バックエンドAPIの契約（パスとリクエスト/レスポンス型）

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::types::{CaptionEntry, ImageDescriptor, ImageRef};

pub const PROJECTS_PATH: &str = "/api/projects";
pub const PROJECT_CONFIG_PATH: &str = "/api/project/config";
pub const DATASET_LOAD_PATH: &str = "/api/dataset/load";
pub const DATASET_SAVE_PATH: &str = "/api/dataset/save";
pub const DATASET_AUTOCAPTION_PATH: &str = "/api/dataset/autocaption";
pub const DATASET_IMAGE_PATH: &str = "/api/dataset/image";
pub const OPEN_DATASET_FOLDER_PATH: &str = "/api/open_dataset_folder";
pub const HUD_PATH: &str = "/vram";

/// encodeURIComponent と同じ非エスケープ文字集合
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

pub fn project_config_path(project: &str) -> String {
    format!("{}/{}", PROJECT_CONFIG_PATH, encode_component(project))
}

/// 画像リソースのパス（相対パスは丸ごと1コンポーネントとしてエンコード）
pub fn image_resource_path(rel_path: &str) -> String {
    format!("{}/{}", DATASET_IMAGE_PATH, encode_component(rel_path))
}

pub fn open_dataset_folder_path(project: &str) -> String {
    format!("{}?project={}", OPEN_DATASET_FOLDER_PATH, encode_component(project))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub dataset_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadDatasetRequest {
    pub project: String,
    pub dataset_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadDatasetResponse {
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

/// 非成功ステータス時の本文 (`{error, path?}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    /// 本文からエラーメッセージを取り出す（JSONでなければ None）
    pub fn parse_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| match b.path {
                Some(path) => format!("{} ({})", b.error, path),
                None => b.error,
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveCaptionsRequest {
    pub images: Vec<CaptionEntry>,
}

/// 保存の応答（中身は参考情報）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub saved: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCaptionRequest {
    pub images: Vec<ImageRef>,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCaptionResponse {
    #[serde(default)]
    pub captions: Vec<CaptionEntry>,
}

/// `/vram` の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudStatus {
    #[serde(default)]
    pub text: Option<String>,
}

impl HudStatus {
    /// 表示する文字列（空なら非表示）
    pub fn display_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component_matches_encode_uri_component() {
        assert_eq!(encode_component("a.jpg"), "a.jpg");
        assert_eq!(encode_component("sub dir/a b.jpg"), "sub%20dir%2Fa%20b.jpg");
        assert_eq!(encode_component("it's(1)!~*.png"), "it's(1)!~*.png");
        assert_eq!(encode_component("a&b=c?#"), "a%26b%3Dc%3F%23");
        assert_eq!(encode_component("写真.jpg"), "%E5%86%99%E7%9C%9F.jpg");
    }

    #[test]
    fn test_paths() {
        assert_eq!(image_resource_path("cats/1.jpg"), "/api/dataset/image/cats%2F1.jpg");
        assert_eq!(project_config_path("my lora"), "/api/project/config/my%20lora");
        assert_eq!(
            open_dataset_folder_path("proj&1"),
            "/api/open_dataset_folder?project=proj%261"
        );
    }

    #[test]
    fn test_load_response_deserialize() {
        let json = r#"{
            "project": "p",
            "dataset_path": "data",
            "images": [
                {"name": "a.jpg", "rel_path": "a.jpg", "caption": "x"},
                {"name": "b.jpg", "rel_path": "b.jpg"}
            ]
        }"#;
        let response: LoadDatasetResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.images.len(), 2);
        assert_eq!(response.images[0].caption.as_deref(), Some("x"));
        assert_eq!(response.images[1].caption, None);
    }

    #[test]
    fn test_auto_caption_request_serialize() {
        let request = AutoCaptionRequest {
            images: vec![ImageRef { name: "a.jpg".to_string() }],
            overwrite: false,
        };
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"images":[{"name":"a.jpg"}],"overwrite":false}"#);
    }

    #[test]
    fn test_save_ack_is_lenient() {
        let ack: SaveAck = serde_json::from_str(r#"{"status":"nothing_to_save","saved":0}"#)
            .expect("デシリアライズ失敗");
        assert_eq!(ack.status, "nothing_to_save");
        let empty: SaveAck = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(empty.saved, 0);
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::parse_message(r#"{"error": "Missing project or dataset path"}"#).as_deref(),
            Some("Missing project or dataset path")
        );
        assert_eq!(
            ErrorBody::parse_message(r#"{"error": "Dataset path does not exist", "path": "/p/data"}"#)
                .as_deref(),
            Some("Dataset path does not exist (/p/data)")
        );
        assert_eq!(ErrorBody::parse_message("Not found"), None);
    }

    #[test]
    fn test_hud_display_text() {
        let hidden: HudStatus = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(hidden.display_text(), None);

        let blank = HudStatus { text: Some("  ".to_string()) };
        assert_eq!(blank.display_text(), None);

        let shown = HudStatus { text: Some("VRAM 3.2 / 8.0 GB".to_string()) };
        assert_eq!(shown.display_text(), Some("VRAM 3.2 / 8.0 GB"));
    }
}
