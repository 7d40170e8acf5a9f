//! データセットの状態モデル
//!
//! 画像リスト・選択・フィルタ・未保存フラグを保持する。UIの知識は持たない。

use crate::types::{CaptionEntry, ImageDescriptor, ImageRecord, ImageRef};

/// 画面全体で1つだけ使うデータセット状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetState {
    images: Vec<ImageRecord>,
    selected_index: Option<usize>,
    filter: String,
    dirty: bool,
}

impl DatasetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&ImageRecord> {
        self.selected_index.and_then(|i| self.images.get(i))
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 未保存の編集が1件でもある
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn dirty_count(&self) -> usize {
        self.images.iter().filter(|img| img.dirty).count()
    }

    /// 画像・選択・未保存フラグを初期状態に戻す（フィルタは残す）
    pub fn reset(&mut self) {
        self.images.clear();
        self.selected_index = None;
        self.dirty = false;
    }

    /// 画像リストを丸ごと置き換える
    ///
    /// 未保存の編集は破棄される。確認は呼び出し側の責任。
    pub fn load_images(&mut self, descriptors: Vec<ImageDescriptor>) {
        self.images = descriptors
            .into_iter()
            .map(ImageRecord::from_descriptor)
            .collect();
        self.selected_index = if self.images.is_empty() { None } else { Some(0) };
        self.dirty = false;
    }

    /// 範囲外のインデックスは無視する
    pub fn select_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.selected_index = Some(index);
        }
    }

    /// キャプションを書き換えて未保存にする
    ///
    /// 何も選択されていない場合・範囲外の場合は何もしない。
    pub fn set_caption(&mut self, index: usize, text: impl Into<String>) {
        if self.selected_index.is_none() {
            return;
        }
        let Some(record) = self.images.get_mut(index) else {
            return;
        };
        record.caption = text.into();
        record.dirty = true;
        self.dirty = true;
    }

    /// 自動キャプション結果を名前で突き合わせて反映する
    ///
    /// 一致しない名前は無視する。反映したレコードは未保存扱いを解除。
    /// 戻り値は反映した件数。
    pub fn apply_caption_results(&mut self, results: &[CaptionEntry]) -> usize {
        let mut applied = 0;
        for result in results {
            if let Some(record) = self.images.iter_mut().find(|img| img.name == result.name) {
                record.caption = result.caption.clone();
                record.dirty = false;
                applied += 1;
            }
        }
        self.refresh_dirty();
        applied
    }

    /// 保存成功後: すべての未保存フラグを解除
    pub fn mark_saved(&mut self) {
        for record in &mut self.images {
            record.dirty = false;
        }
        self.dirty = false;
    }

    /// 送信した内容と現在のキャプションが一致するレコードだけ未保存を解除
    ///
    /// 保存リクエストの応答待ちの間に編集されたレコードは未保存のまま残る。
    pub fn mark_saved_matching(&mut self, sent: &[CaptionEntry]) {
        for record in &mut self.images {
            let unchanged = sent
                .iter()
                .find(|entry| entry.name == record.name)
                .is_some_and(|entry| entry.caption == record.caption);
            if unchanged {
                record.dirty = false;
            }
        }
        self.refresh_dirty();
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// 名前がフィルタに一致するか（大文字小文字を区別しない部分一致）
    pub fn matches_filter(&self, name: &str) -> bool {
        let query = self.filter.trim().to_lowercase();
        query.is_empty() || name.to_lowercase().contains(&query)
    }

    /// 保存リクエスト用の全件 (name, caption)
    pub fn caption_entries(&self) -> Vec<CaptionEntry> {
        self.images
            .iter()
            .map(|img| CaptionEntry {
                name: img.name.clone(),
                caption: img.caption.clone(),
            })
            .collect()
    }

    /// 自動キャプションの対象
    ///
    /// `overwrite` が false のときはキャプションが空のものだけ。
    pub fn auto_caption_targets(&self, overwrite: bool) -> Vec<ImageRef> {
        self.images
            .iter()
            .filter(|img| overwrite || img.has_blank_caption())
            .map(|img| ImageRef { name: img.name.clone() })
            .collect()
    }

    fn refresh_dirty(&mut self) {
        self.dirty = self.images.iter().any(|img| img.dirty);
    }
}
