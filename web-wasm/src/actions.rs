//! 画面操作からバックエンド呼び出しまで
//!
//! `begin_*` で状態を確定させてから fetch し、応答は `finish_*` に返す。
//! 古い応答の破棄はコントローラ側で行う。

use caption_prep_common::{Controller, Gateway};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::FetchGateway;

const DISCARD_CONFIRM_TEXT: &str = "未保存の変更があります。破棄して読み込み直しますか？";

pub fn refresh_projects(ctrl: RwSignal<Controller>) {
    let Some(pending) = ctrl.try_update(|c| c.begin_projects()) else {
        return;
    };
    spawn_local(async move {
        let result = FetchGateway.list_projects().await;
        ctrl.update(|c| {
            c.finish_projects(pending, result);
        });
    });
}

/// プロジェクトを切り替え、既定のデータセットパスを取りに行く
pub fn choose_project(ctrl: RwSignal<Controller>, project: String) {
    let Some(Some(pending)) = ctrl.try_update(|c| c.choose_project(project)) else {
        return;
    };
    spawn_local(async move {
        let result = FetchGateway.project_config(&pending.request).await;
        ctrl.update(|c| {
            c.finish_project_config(pending, result);
        });
    });
}

pub fn load_dataset(ctrl: RwSignal<Controller>) {
    if ctrl.with_untracked(|c| c.has_unsaved_changes()) && !gloo::dialogs::confirm(DISCARD_CONFIRM_TEXT) {
        return;
    }
    // 入力不足はコントローラが読み込み欄にエラーを出す
    let Some(Ok(pending)) = ctrl.try_update(|c| c.begin_load()) else {
        return;
    };
    spawn_local(async move {
        let result = FetchGateway.load_dataset(&pending.request).await;
        ctrl.update(|c| {
            c.finish_load(pending, result);
        });
    });
}

pub fn save_captions(ctrl: RwSignal<Controller>) {
    let Some(pending) = ctrl.try_update(|c| c.begin_save()).flatten() else {
        return;
    };
    spawn_local(async move {
        let result = FetchGateway.save_captions(&pending.request).await;
        ctrl.update(|c| {
            c.finish_save(pending, result);
        });
    });
}

pub fn auto_caption(ctrl: RwSignal<Controller>, overwrite: bool) {
    let Some(pending) = ctrl.try_update(|c| c.begin_auto_caption(overwrite)).flatten() else {
        return;
    };
    spawn_local(async move {
        let result = FetchGateway.auto_caption(&pending.request).await;
        ctrl.update(|c| {
            c.finish_auto_caption(pending, result);
        });
    });
}

/// サーバー側でデータセットフォルダを開く（失敗はログのみ）
pub fn open_dataset_folder(ctrl: RwSignal<Controller>) {
    let project = ctrl.with_untracked(|c| c.project().to_string());
    if project.is_empty() {
        log::warn!("[dataset] no project selected");
        return;
    }
    spawn_local(async move {
        if let Err(err) = FetchGateway.open_dataset_folder(&project).await {
            log::warn!("[dataset] could not open dataset folder: {}", err);
        }
    });
}
