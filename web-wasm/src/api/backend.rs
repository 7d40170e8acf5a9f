//! fetch によるバックエンド呼び出し（同一オリジン）

use caption_prep_common::api::{
    self, AutoCaptionRequest, AutoCaptionResponse, ErrorBody, HudStatus, LoadDatasetRequest,
    LoadDatasetResponse, ProjectConfig, ProjectsResponse, SaveAck, SaveCaptionsRequest,
};
use caption_prep_common::{Error, Gateway, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchGateway;

impl FetchGateway {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = send("GET", path, None).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        let response = send("POST", path, Some(body)).await?;
        decode(response).await
    }
}

/// リクエストを送り、非成功ステータスはバックエンドエラーにする
async fn send(method: &str, path: &str, body: Option<String>) -> Result<Response> {
    log::debug!("{} {}", method, path);

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(path, &opts).map_err(transport_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Transport("window がありません".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?;
    let resp: Response = resp_value.dyn_into().map_err(transport_error)?;
    check_status(resp).await
}

async fn check_status(resp: Response) -> Result<Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = read_text(&resp).await.unwrap_or_default();
    let message = ErrorBody::parse_message(&body).unwrap_or_else(|| {
        let text = body.trim();
        if text.is_empty() {
            format!("HTTP {}", status)
        } else {
            text.to_string()
        }
    });
    Err(Error::Backend { status, message })
}

async fn read_text(resp: &Response) -> Result<String> {
    let promise = resp.text().map_err(transport_error)?;
    let value = JsFuture::from(promise).await.map_err(transport_error)?;
    Ok(value.as_string().unwrap_or_default())
}

/// 本文をJSONとして読む。JSONでなければ Decode エラー。
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let promise = resp.json().map_err(decode_error)?;
    let json = JsFuture::from(promise).await.map_err(decode_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Decode(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn transport_error(value: JsValue) -> Error {
    Error::Transport(describe(&value))
}

fn decode_error(value: JsValue) -> Error {
    Error::Decode(describe(&value))
}

impl Gateway for FetchGateway {
    async fn list_projects(&self) -> Result<Vec<String>> {
        let response: ProjectsResponse = self.get_json(api::PROJECTS_PATH).await?;
        Ok(response.projects)
    }

    async fn project_config(&self, project: &str) -> Result<ProjectConfig> {
        self.get_json(&api::project_config_path(project)).await
    }

    async fn load_dataset(&self, request: &LoadDatasetRequest) -> Result<LoadDatasetResponse> {
        self.post_json(api::DATASET_LOAD_PATH, request).await
    }

    async fn save_captions(&self, request: &SaveCaptionsRequest) -> Result<SaveAck> {
        self.post_json(api::DATASET_SAVE_PATH, request).await
    }

    async fn auto_caption(&self, request: &AutoCaptionRequest) -> Result<AutoCaptionResponse> {
        self.post_json(api::DATASET_AUTOCAPTION_PATH, request).await
    }

    async fn open_dataset_folder(&self, project: &str) -> Result<()> {
        send("POST", &api::open_dataset_folder_path(project), None).await?;
        Ok(())
    }

    async fn hud_status(&self) -> Result<HudStatus> {
        self.get_json(api::HUD_PATH).await
    }
}
