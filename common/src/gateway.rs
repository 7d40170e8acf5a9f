//! バックエンド呼び出しの抽象
//!
//! ブラウザ版は fetch、CLI版は reqwest で実装する。状態は持たない。

use crate::api::{
    AutoCaptionRequest, AutoCaptionResponse, HudStatus, LoadDatasetRequest, LoadDatasetResponse,
    ProjectConfig, SaveAck, SaveCaptionsRequest,
};
use crate::error::Result;

#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn list_projects(&self) -> Result<Vec<String>>;

    async fn project_config(&self, project: &str) -> Result<ProjectConfig>;

    async fn load_dataset(&self, request: &LoadDatasetRequest) -> Result<LoadDatasetResponse>;

    async fn save_captions(&self, request: &SaveCaptionsRequest) -> Result<SaveAck>;

    async fn auto_caption(&self, request: &AutoCaptionRequest) -> Result<AutoCaptionResponse>;

    async fn open_dataset_folder(&self, project: &str) -> Result<()>;

    async fn hud_status(&self) -> Result<HudStatus>;
}
