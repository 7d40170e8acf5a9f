//! reqwest によるバックエンド呼び出し

use std::time::Duration;

use caption_prep_common::api::{
    self, AutoCaptionRequest, AutoCaptionResponse, ErrorBody, HudStatus, LoadDatasetRequest,
    LoadDatasetResponse, ProjectConfig, ProjectsResponse, SaveAck, SaveCaptionsRequest,
};
use caption_prep_common::{Error, Gateway};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> caption_prep_common::Result<T> {
        log::debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> caption_prep_common::Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

/// 非成功ステータスはバックエンドエラー、成功時は本文をJSONとして読む
async fn decode<T: DeserializeOwned>(response: Response) -> caption_prep_common::Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
}

async fn check_status(response: Response) -> caption_prep_common::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = ErrorBody::parse_message(&body).unwrap_or_else(|| {
        let text = body.trim();
        if text.is_empty() {
            status.to_string()
        } else {
            text.to_string()
        }
    });
    Err(Error::Backend {
        status: status.as_u16(),
        message,
    })
}

impl Gateway for HttpGateway {
    async fn list_projects(&self) -> caption_prep_common::Result<Vec<String>> {
        let response: ProjectsResponse = self.get_json(api::PROJECTS_PATH).await?;
        Ok(response.projects)
    }

    async fn project_config(&self, project: &str) -> caption_prep_common::Result<ProjectConfig> {
        self.get_json(&api::project_config_path(project)).await
    }

    async fn load_dataset(
        &self,
        request: &LoadDatasetRequest,
    ) -> caption_prep_common::Result<LoadDatasetResponse> {
        self.post_json(api::DATASET_LOAD_PATH, request).await
    }

    async fn save_captions(&self, request: &SaveCaptionsRequest) -> caption_prep_common::Result<SaveAck> {
        self.post_json(api::DATASET_SAVE_PATH, request).await
    }

    async fn auto_caption(
        &self,
        request: &AutoCaptionRequest,
    ) -> caption_prep_common::Result<AutoCaptionResponse> {
        self.post_json(api::DATASET_AUTOCAPTION_PATH, request).await
    }

    async fn open_dataset_folder(&self, project: &str) -> caption_prep_common::Result<()> {
        let path = api::open_dataset_folder_path(project);
        log::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(&path))
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    async fn hud_status(&self) -> caption_prep_common::Result<HudStatus> {
        self.get_json(api::HUD_PATH).await
    }
}
