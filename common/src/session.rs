//! 非同期セッション
//!
//! Controller の `begin_*` / `finish_*` の間に Gateway 呼び出しを挟む。
//! 1つの操作が終わるまで次の操作を受け付けない呼び出し側（CLI）向け。

use crate::api::HudStatus;
use crate::controller::{Completion, Controller};
use crate::error::{Error, Result};
use crate::gateway::Gateway;

pub struct Session<G> {
    gateway: G,
    controller: Controller,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            controller: Controller::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn refresh_projects(&mut self) -> Completion {
        let pending = self.controller.begin_projects();
        let result = self.gateway.list_projects().await;
        self.controller.finish_projects(pending, result)
    }

    /// プロジェクトを選び、既定のデータセットパスを入力欄に反映
    pub async fn choose_project(&mut self, project: &str) -> Completion {
        let Some(pending) = self.controller.choose_project(project) else {
            return Completion::Skipped;
        };
        let result = self.gateway.project_config(&pending.request).await;
        self.controller.finish_project_config(pending, result)
    }

    pub async fn load_dataset(&mut self) -> Completion {
        let pending = match self.controller.begin_load() {
            Ok(pending) => pending,
            Err(err) => return Completion::Failed(err.user_message("")),
        };
        let result = self.gateway.load_dataset(&pending.request).await;
        self.controller.finish_load(pending, result)
    }

    pub async fn save(&mut self) -> Completion {
        let Some(pending) = self.controller.begin_save() else {
            return Completion::Skipped;
        };
        let result = self.gateway.save_captions(&pending.request).await;
        self.controller.finish_save(pending, result)
    }

    pub async fn auto_caption(&mut self, overwrite: bool) -> Completion {
        let Some(pending) = self.controller.begin_auto_caption(overwrite) else {
            return Completion::Skipped;
        };
        let result = self.gateway.auto_caption(&pending.request).await;
        self.controller.finish_auto_caption(pending, result)
    }

    pub async fn open_dataset_folder(&self) -> Result<()> {
        let project = self.controller.project();
        if project.is_empty() {
            return Err(Error::Validation("プロジェクトが選択されていません".to_string()));
        }
        self.gateway.open_dataset_folder(project).await
    }

    pub async fn hud_status(&self) -> Result<HudStatus> {
        self.gateway.hud_status().await
    }
}
