//! データセットの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ImageDescriptor: バックエンドから届く画像情報
//! - ImageRecord: 画面側で保持する1画像ぶんの状態
//! - CaptionEntry: 保存・自動キャプション結果で使う (name, caption) の組

use serde::{Deserialize, Serialize};

/// バックエンドの画像情報 (`/api/dataset/load` の `images[]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub name: String,
    pub rel_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// データセット内の1画像
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRecord {
    /// 表示名（データセット内で一意）
    pub name: String,
    /// 画像リソースの相対パス
    pub path: String,
    pub caption: String,
    /// 最後の保存以降にローカルで編集された
    pub dirty: bool,
}

impl ImageRecord {
    pub fn from_descriptor(descriptor: ImageDescriptor) -> Self {
        Self {
            name: descriptor.name,
            path: descriptor.rel_path,
            caption: descriptor.caption.unwrap_or_default(),
            dirty: false,
        }
    }

    /// キャプションが空（空白のみを含む）
    pub fn has_blank_caption(&self) -> bool {
        self.caption.trim().is_empty()
    }
}

/// (name, caption) の組
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub name: String,
    #[serde(default)]
    pub caption: String,
}

/// 名前だけの画像参照（自動キャプション要求）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
}
