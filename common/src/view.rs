//! 状態モデル → 表示モデルの射影
//!
//! 副作用なし。DOM・端末への反映は各フロントエンドが行う。

use crate::api::image_resource_path;
use crate::model::DatasetState;

pub const NO_SELECTION_TEXT: &str = "画像が選択されていません";

/// 画像リストの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// フィルタ前のインデックス（クリック時の選択に使う）
    pub index: usize,
    pub name: String,
    pub selected: bool,
    pub dirty: bool,
}

/// プレビュー欄
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    Placeholder(&'static str),
    Image { src: String, alt: String },
}

/// キャプション編集欄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionEditorView {
    pub text: String,
    pub enabled: bool,
}

/// ステータス行
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusView {
    pub total: usize,
    pub shown: usize,
    pub dirty: usize,
    pub unsaved: bool,
}

impl StatusView {
    pub fn summary(&self) -> String {
        let mut text = if self.shown == self.total {
            format!("{}枚", self.total)
        } else {
            format!("{} / {}枚", self.shown, self.total)
        };
        if self.unsaved {
            text.push_str(&format!(" ・未保存 {}件", self.dirty));
        }
        text
    }
}

pub fn list_view(state: &DatasetState) -> Vec<ListEntry> {
    state
        .images()
        .iter()
        .enumerate()
        .filter(|(_, img)| state.matches_filter(&img.name))
        .map(|(index, img)| ListEntry {
            index,
            name: img.name.clone(),
            selected: state.selected_index() == Some(index),
            dirty: img.dirty,
        })
        .collect()
}

pub fn preview_view(state: &DatasetState) -> PreviewView {
    match state.selected() {
        Some(img) => PreviewView::Image {
            src: image_resource_path(&img.path),
            alt: img.name.clone(),
        },
        None => PreviewView::Placeholder(NO_SELECTION_TEXT),
    }
}

pub fn caption_editor_view(state: &DatasetState) -> CaptionEditorView {
    match state.selected() {
        Some(img) => CaptionEditorView {
            text: img.caption.clone(),
            enabled: true,
        },
        None => CaptionEditorView::default(),
    }
}

pub fn status_view(state: &DatasetState) -> StatusView {
    StatusView {
        total: state.len(),
        shown: state
            .images()
            .iter()
            .filter(|img| state.matches_filter(&img.name))
            .count(),
        dirty: state.dirty_count(),
        unsaved: state.is_dirty(),
    }
}
