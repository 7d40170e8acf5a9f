//! 操作コントローラ
//!
//! ユーザー操作を状態モデルへの変更に変換し、バックエンド呼び出しを
//! `begin_*`（検証・リクエスト生成・控え発行）と `finish_*`（応答反映）に
//! 分けて扱う。通信そのものは行わない。
//!
//! 応答は控え（[`Ticket`]）が最新のときだけ反映し、古い応答は捨てる。

use crate::api::{
    AutoCaptionRequest, AutoCaptionResponse, LoadDatasetRequest, LoadDatasetResponse,
    ProjectConfig, SaveAck, SaveCaptionsRequest,
};
use crate::error::{Error, Result};
use crate::model::DatasetState;
use crate::sequence::{RequestKind, RequestSequencer, Ticket};

pub const MISSING_INPUT_TEXT: &str = "プロジェクトとデータセットパスは必須です";
pub const LOAD_FAILED_TEXT: &str = "データセットの読み込みに失敗しました";
pub const SAVE_FAILED_TEXT: &str = "保存に失敗しました";
pub const AUTO_CAPTION_FAILED_TEXT: &str = "自動キャプションに失敗しました";
pub const PROJECTS_FAILED_TEXT: &str = "プロジェクト一覧の取得に失敗しました";
pub const CONFIG_FAILED_TEXT: &str = "プロジェクト設定の取得に失敗しました";

/// 画面に出す通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// 送信待ちのリクエスト
#[derive(Debug, Clone)]
pub struct Pending<R> {
    pub ticket: Ticket,
    pub request: R,
    edit_generation: u64,
}

/// 応答の反映結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// 通信不要（未保存なし・対象なし）
    Skipped,
    /// 新しいリクエストに追い越された応答
    Stale,
    Failed(String),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: DatasetState,
    sequencer: RequestSequencer,
    projects: Vec<String>,
    project: String,
    dataset_path: String,
    load_error: Option<String>,
    notice: Option<Notice>,
    edit_generation: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    /// 読み込み欄に出すエラー
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn is_busy(&self, kind: RequestKind) -> bool {
        self.sequencer.in_flight(kind)
    }

    // ---- 画面操作 ----

    pub fn select(&mut self, index: usize) {
        self.state.select_image(index);
        if let Some(img) = self.state.selected() {
            log::debug!("[dataset] selected image: {} ({})", img.name, index);
        }
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.state.set_filter(text);
    }

    /// 選択中の画像のキャプションを編集
    pub fn edit_caption(&mut self, text: impl Into<String>) {
        let Some(index) = self.state.selected_index() else {
            return;
        };
        self.state.set_caption(index, text);
        self.edit_generation += 1;
    }

    pub fn set_dataset_path(&mut self, path: impl Into<String>) {
        self.dataset_path = path.into();
    }

    /// 設定を取りに行かずにプロジェクトだけ切り替える
    pub fn set_project(&mut self, project: impl Into<String>) {
        self.project = project.into();
    }

    // ---- プロジェクト一覧 ----

    pub fn begin_projects(&mut self) -> Pending<()> {
        self.pending(RequestKind::Projects, ())
    }

    pub fn finish_projects(&mut self, pending: Pending<()>, result: Result<Vec<String>>) -> Completion {
        if !self.settle(&pending.ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(projects) => {
                log::debug!("[dataset] {} projects", projects.len());
                self.projects = projects;
                Completion::Applied
            }
            Err(err) => self.fail(PROJECTS_FAILED_TEXT, err),
        }
    }

    // ---- プロジェクト選択 ----

    /// プロジェクトを選び、設定（既定のデータセットパス）の取得を始める
    pub fn choose_project(&mut self, project: impl Into<String>) -> Option<Pending<String>> {
        self.project = project.into();
        if self.project.is_empty() {
            return None;
        }
        let project = self.project.clone();
        Some(self.pending(RequestKind::ProjectConfig, project))
    }

    pub fn finish_project_config(
        &mut self,
        pending: Pending<String>,
        result: Result<ProjectConfig>,
    ) -> Completion {
        if !self.settle(&pending.ticket) || pending.request != self.project {
            return Completion::Stale;
        }
        match result {
            Ok(config) => {
                self.dataset_path = config.dataset_path;
                Completion::Applied
            }
            Err(err) => self.fail(CONFIG_FAILED_TEXT, err),
        }
    }

    // ---- データセット読み込み ----

    /// 入力を検証して読み込みリクエストを作る
    ///
    /// プロジェクトかパスが空なら通信せず、読み込み欄にエラーを出す。
    pub fn begin_load(&mut self) -> Result<Pending<LoadDatasetRequest>> {
        self.load_error = None;
        let dataset_path = self.dataset_path.trim();
        if self.project.is_empty() || dataset_path.is_empty() {
            self.load_error = Some(MISSING_INPUT_TEXT.to_string());
            return Err(Error::Validation(MISSING_INPUT_TEXT.to_string()));
        }
        let request = LoadDatasetRequest {
            project: self.project.clone(),
            dataset_path: dataset_path.to_string(),
        };
        Ok(self.pending(RequestKind::Load, request))
    }

    pub fn finish_load(
        &mut self,
        pending: Pending<LoadDatasetRequest>,
        result: Result<LoadDatasetResponse>,
    ) -> Completion {
        if !self.settle(&pending.ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(response) => {
                let count = response.images.len();
                self.state.load_images(response.images);
                self.sequencer.advance_epoch();
                self.load_error = None;
                self.notice = Some(Notice::Info(format!("{}枚の画像を読み込みました", count)));
                log::debug!(
                    "[dataset] loaded {} images from {}/{}",
                    count,
                    pending.request.project,
                    pending.request.dataset_path
                );
                Completion::Applied
            }
            Err(err) => {
                let message = err.user_message(LOAD_FAILED_TEXT);
                log::warn!("[dataset] load failed: {}", err);
                self.load_error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    // ---- 保存 ----

    /// 未保存の編集がなければ None（通信しない）
    pub fn begin_save(&mut self) -> Option<Pending<SaveCaptionsRequest>> {
        if !self.state.is_dirty() {
            log::debug!("[dataset] nothing to save");
            return None;
        }
        let request = SaveCaptionsRequest {
            images: self.state.caption_entries(),
        };
        Some(self.pending(RequestKind::Save, request))
    }

    /// 成功時のみ未保存フラグを解除する。失敗時は編集内容を残す。
    pub fn finish_save(
        &mut self,
        pending: Pending<SaveCaptionsRequest>,
        result: Result<SaveAck>,
    ) -> Completion {
        if !self.settle(&pending.ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(ack) => {
                if pending.edit_generation == self.edit_generation {
                    self.state.mark_saved();
                } else {
                    self.state.mark_saved_matching(&pending.request.images);
                }
                log::debug!("[dataset] save response: {} ({} saved)", ack.status, ack.saved);
                self.notice = Some(Notice::Info(format!("{}件のキャプションを保存しました", ack.saved)));
                Completion::Applied
            }
            Err(err) => self.fail(SAVE_FAILED_TEXT, err),
        }
    }

    // ---- 自動キャプション ----

    /// 対象がなければ None（通信しない）
    pub fn begin_auto_caption(&mut self, overwrite: bool) -> Option<Pending<AutoCaptionRequest>> {
        let images = self.state.auto_caption_targets(overwrite);
        if images.is_empty() {
            log::debug!("[dataset] no images to caption");
            self.notice = Some(Notice::Info("キャプション生成の対象がありません".to_string()));
            return None;
        }
        let request = AutoCaptionRequest { images, overwrite };
        Some(self.pending(RequestKind::AutoCaption, request))
    }

    pub fn finish_auto_caption(
        &mut self,
        pending: Pending<AutoCaptionRequest>,
        result: Result<AutoCaptionResponse>,
    ) -> Completion {
        if !self.settle(&pending.ticket) {
            return Completion::Stale;
        }
        match result {
            Ok(response) => {
                let applied = self.state.apply_caption_results(&response.captions);
                log::debug!("[dataset] auto-caption complete: {} applied", applied);
                self.notice = Some(Notice::Info(format!("{}件のキャプションを生成しました", applied)));
                Completion::Applied
            }
            Err(err) => self.fail(AUTO_CAPTION_FAILED_TEXT, err),
        }
    }

    fn pending<R>(&mut self, kind: RequestKind, request: R) -> Pending<R> {
        Pending {
            ticket: self.sequencer.issue(kind),
            request,
            edit_generation: self.edit_generation,
        }
    }

    /// 最新の控えなら閉じて true
    fn settle(&mut self, ticket: &Ticket) -> bool {
        let current = self.sequencer.is_current(ticket);
        // 世代違いで破棄する場合も、最新の控えなら送信中の状態を解除する
        self.sequencer.complete(ticket);
        if !current {
            log::debug!("[dataset] discarded stale {} response (seq {})", ticket.kind.as_str(), ticket.seq);
        }
        current
    }

    fn fail(&mut self, fallback: &str, err: Error) -> Completion {
        log::warn!("[dataset] {}: {}", fallback, err);
        let message = match &err {
            Error::Backend { .. } => format!("{}: {}", fallback, err.user_message(fallback)),
            _ => fallback.to_string(),
        };
        self.notice = Some(Notice::Error(message.clone()));
        Completion::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaptionEntry, ImageDescriptor};

    fn images(names: &[&str]) -> LoadDatasetResponse {
        LoadDatasetResponse {
            images: names
                .iter()
                .map(|n| ImageDescriptor {
                    name: n.to_string(),
                    rel_path: n.to_string(),
                    caption: None,
                })
                .collect(),
        }
    }

    fn loaded(names: &[&str]) -> Controller {
        let mut controller = Controller::new();
        controller.choose_project("proj");
        controller.set_dataset_path("data");
        let pending = controller.begin_load().expect("検証失敗");
        assert_eq!(controller.finish_load(pending, Ok(images(names))), Completion::Applied);
        controller
    }

    fn transport_error() -> Error {
        Error::Transport("connection refused".to_string())
    }

    // =============================================
    // 読み込み
    // =============================================

    #[test]
    fn test_load_requires_project_and_path() {
        let mut controller = Controller::new();
        controller.set_dataset_path("data");
        let result = controller.begin_load();
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(controller.load_error(), Some(MISSING_INPUT_TEXT));
        assert!(!controller.is_busy(RequestKind::Load));

        controller.choose_project("proj");
        controller.set_dataset_path("   ");
        assert!(controller.begin_load().is_err());
    }

    #[test]
    fn test_load_trims_dataset_path() {
        let mut controller = Controller::new();
        controller.choose_project("proj");
        controller.set_dataset_path("  data/train ");
        let pending = controller.begin_load().expect("検証失敗");
        assert_eq!(pending.request.project, "proj");
        assert_eq!(pending.request.dataset_path, "data/train");
        assert!(controller.is_busy(RequestKind::Load));
    }

    #[test]
    fn test_load_success_selects_first() {
        let controller = loaded(&["a.jpg", "b.jpg"]);
        assert_eq!(controller.state().selected_index(), Some(0));
        assert!(!controller.has_unsaved_changes());
        assert_eq!(controller.load_error(), None);
        assert!(!controller.is_busy(RequestKind::Load));
    }

    #[test]
    fn test_load_failure_shows_backend_message() {
        let mut controller = Controller::new();
        controller.choose_project("proj");
        controller.set_dataset_path("missing");
        let pending = controller.begin_load().expect("検証失敗");
        let completion = controller.finish_load(
            pending,
            Err(Error::Backend {
                status: 400,
                message: "Dataset path does not exist".to_string(),
            }),
        );
        assert_eq!(completion, Completion::Failed("Dataset path does not exist".to_string()));
        assert_eq!(controller.load_error(), Some("Dataset path does not exist"));
    }

    #[test]
    fn test_load_failure_transport_uses_fallback() {
        let mut controller = loaded(&["a.jpg"]);
        controller.edit_caption("keep me");
        let pending = controller.begin_load().expect("検証失敗");
        controller.finish_load(pending, Err(transport_error()));

        assert_eq!(controller.load_error(), Some(LOAD_FAILED_TEXT));
        // 失敗時は既存の状態を残す
        assert_eq!(controller.state().images()[0].caption, "keep me");
        assert!(controller.has_unsaved_changes());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut controller = Controller::new();
        controller.choose_project("proj");
        controller.set_dataset_path("old");
        let older = controller.begin_load().expect("検証失敗");
        controller.set_dataset_path("new");
        let newer = controller.begin_load().expect("検証失敗");

        assert_eq!(controller.finish_load(newer, Ok(images(&["new.jpg"]))), Completion::Applied);
        assert_eq!(controller.finish_load(older, Ok(images(&["old.jpg"]))), Completion::Stale);
        assert_eq!(controller.state().images()[0].name, "new.jpg");
    }

    #[test]
    fn test_same_ticket_applies_once() {
        let mut controller = Controller::new();
        controller.choose_project("proj");
        controller.set_dataset_path("data");
        let pending = controller.begin_load().expect("検証失敗");
        let copy = pending.clone();
        assert!(controller.finish_load(pending, Ok(images(&["a.jpg"]))).is_applied());
        assert_eq!(controller.finish_load(copy, Ok(images(&["b.jpg"]))), Completion::Stale);
    }

    // =============================================
    // 選択・編集
    // =============================================

    #[test]
    fn test_select_and_edit() {
        let mut controller = loaded(&["a.jpg", "b.jpg"]);
        controller.select(1);
        controller.edit_caption("second");
        controller.select(5);

        let state = controller.state();
        assert_eq!(state.selected_index(), Some(1));
        assert_eq!(state.images()[1].caption, "second");
        assert!(state.images()[1].dirty);
    }

    #[test]
    fn test_edit_without_selection_is_noop() {
        let mut controller = Controller::new();
        controller.edit_caption("nothing");
        assert!(!controller.has_unsaved_changes());
    }

    // =============================================
    // 保存
    // =============================================

    #[test]
    fn test_save_while_clean_is_skipped() {
        let mut controller = loaded(&["a.jpg"]);
        assert!(controller.begin_save().is_none());
        assert!(!controller.is_busy(RequestKind::Save));
    }

    #[test]
    fn test_save_success_clears_dirty() {
        let mut controller = loaded(&["a.jpg", "b.jpg"]);
        controller.edit_caption("hello");
        assert!(controller.has_unsaved_changes());

        let pending = controller.begin_save().expect("保存対象なし");
        assert_eq!(
            pending.request.images,
            vec![
                CaptionEntry { name: "a.jpg".into(), caption: "hello".into() },
                CaptionEntry { name: "b.jpg".into(), caption: "".into() },
            ]
        );
        let ack = SaveAck { status: "ok".into(), saved: 2 };
        assert!(controller.finish_save(pending, Ok(ack)).is_applied());
        assert!(!controller.has_unsaved_changes());
        assert!(!controller.state().images()[0].dirty);
    }

    #[test]
    fn test_save_failure_keeps_dirty() {
        let mut controller = loaded(&["a.jpg"]);
        controller.edit_caption("hello");
        let pending = controller.begin_save().expect("保存対象なし");
        let completion = controller.finish_save(pending, Err(transport_error()));

        assert_eq!(completion, Completion::Failed(SAVE_FAILED_TEXT.to_string()));
        assert!(controller.has_unsaved_changes());
        assert_eq!(controller.state().images()[0].caption, "hello");
        assert!(controller.notice().is_some_and(Notice::is_error));
    }

    #[test]
    fn test_edit_during_save_stays_dirty() {
        let mut controller = loaded(&["a.jpg", "b.jpg"]);
        controller.edit_caption("first");
        let pending = controller.begin_save().expect("保存対象なし");

        controller.select(1);
        controller.edit_caption("typed while saving");
        controller.finish_save(pending, Ok(SaveAck::default()));

        assert!(!controller.state().images()[0].dirty);
        assert!(controller.state().images()[1].dirty);
        assert!(controller.has_unsaved_changes());
    }

    #[test]
    fn test_save_response_after_reload_is_stale() {
        let mut controller = loaded(&["a.jpg"]);
        controller.edit_caption("x");
        let save = controller.begin_save().expect("保存対象なし");

        let load = controller.begin_load().expect("検証失敗");
        controller.finish_load(load, Ok(images(&["b.jpg"])));
        controller.select(0);
        controller.edit_caption("new dataset edit");

        assert_eq!(controller.finish_save(save, Ok(SaveAck::default())), Completion::Stale);
        assert!(controller.has_unsaved_changes());
        assert!(!controller.is_busy(RequestKind::Save));
    }

    // =============================================
    // 自動キャプション
    // =============================================

    #[test]
    fn test_auto_caption_targets_blank_only() {
        let mut controller = loaded(&["a", "b"]);
        controller.select(1);
        controller.edit_caption("x");

        let pending = controller.begin_auto_caption(false).expect("対象なし");
        let names: Vec<&str> = pending.request.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
        assert!(!pending.request.overwrite);

        let all = controller.begin_auto_caption(true).expect("対象なし");
        assert_eq!(all.request.images.len(), 2);
        assert!(all.request.overwrite);
    }

    #[test]
    fn test_auto_caption_empty_set_is_skipped() {
        let mut controller = loaded(&["a"]);
        controller.edit_caption("done");
        assert!(controller.begin_auto_caption(false).is_none());
        assert!(!controller.is_busy(RequestKind::AutoCaption));

        let mut empty = Controller::new();
        assert!(empty.begin_auto_caption(true).is_none());
    }

    #[test]
    fn test_auto_caption_applies_results() {
        let mut controller = loaded(&["a.jpg", "b.jpg"]);
        let pending = controller.begin_auto_caption(false).expect("対象なし");
        let response = AutoCaptionResponse {
            captions: vec![CaptionEntry { name: "b.jpg".into(), caption: "a red car".into() }],
        };
        assert!(controller.finish_auto_caption(pending, Ok(response)).is_applied());
        assert_eq!(controller.state().images()[1].caption, "a red car");
        assert!(!controller.state().images()[1].dirty);
        assert_eq!(controller.state().images()[0].caption, "");
    }

    #[test]
    fn test_auto_caption_failure_keeps_captions() {
        let mut controller = loaded(&["a.jpg", "b.jpg"]);
        controller.select(1);
        controller.edit_caption("mine");
        let pending = controller.begin_auto_caption(true).expect("対象なし");
        let completion = controller.finish_auto_caption(
            pending,
            Err(Error::Backend { status: 400, message: "No images provided".into() }),
        );

        assert_eq!(
            completion,
            Completion::Failed(format!("{}: No images provided", AUTO_CAPTION_FAILED_TEXT))
        );
        assert_eq!(controller.state().images()[1].caption, "mine");
        assert!(controller.has_unsaved_changes());
    }

    #[test]
    fn test_auto_caption_response_after_reload_is_stale() {
        let mut controller = loaded(&["a.jpg"]);
        let pending = controller.begin_auto_caption(false).expect("対象なし");

        // 同名の画像を含む別データセットを読み込み直す
        let load = controller.begin_load().expect("検証失敗");
        controller.finish_load(load, Ok(images(&["a.jpg", "b.jpg"])));
        controller.select(0);
        controller.edit_caption("new dataset edit");

        let response = AutoCaptionResponse {
            captions: vec![CaptionEntry { name: "a.jpg".into(), caption: "old dataset caption".into() }],
        };
        assert_eq!(controller.finish_auto_caption(pending, Ok(response)), Completion::Stale);

        let images = controller.state().images();
        assert_eq!(images[0].caption, "new dataset edit");
        assert!(images[0].dirty);
        assert_eq!(images[1].caption, "");
        assert!(controller.has_unsaved_changes());
        assert!(!controller.is_busy(RequestKind::AutoCaption));
    }

    // =============================================
    // プロジェクト
    // =============================================

    #[test]
    fn test_projects_and_config() {
        let mut controller = Controller::new();
        let pending = controller.begin_projects();
        controller.finish_projects(pending, Ok(vec!["alpha".into(), "beta".into()]));
        assert_eq!(controller.projects(), ["alpha".to_string(), "beta".to_string()]);

        let pending = controller.choose_project("beta").expect("プロジェクト未選択");
        assert_eq!(pending.request, "beta");
        controller.finish_project_config(pending, Ok(ProjectConfig { dataset_path: "dataset".into() }));
        assert_eq!(controller.dataset_path(), "dataset");
    }

    #[test]
    fn test_choose_empty_project() {
        let mut controller = Controller::new();
        assert!(controller.choose_project("").is_none());
    }

    #[test]
    fn test_config_for_previous_project_is_stale() {
        let mut controller = Controller::new();
        let first = controller.choose_project("alpha").expect("プロジェクト未選択");
        let second = controller.choose_project("beta").expect("プロジェクト未選択");

        let late = controller.finish_project_config(first, Ok(ProjectConfig { dataset_path: "a".into() }));
        assert_eq!(late, Completion::Stale);
        controller.finish_project_config(second, Ok(ProjectConfig { dataset_path: "b".into() }));
        assert_eq!(controller.dataset_path(), "b");
    }
}
