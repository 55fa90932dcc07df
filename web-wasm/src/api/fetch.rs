//! fetch APIによるバックエンド実装
//!
//! 同一オリジンの相対パス（/upload 等）にPOSTする。
//! レスポンスはステータスコードに関係なくJSONとして読む。

use serde::de::DeserializeOwned;
use serde::Serialize;
use splitcut_common::{
    Backend, ConcatRequest, ConcatResponse, SplitRequest, SplitResponse, ThumbnailsRequest,
    ThumbnailsResponse, TransportError, TransportResult, UploadResponse, CONCAT_ENDPOINT,
    SPLIT_ENDPOINT, THUMBNAILS_ENDPOINT, UPLOAD_ENDPOINT, UPLOAD_FIELD,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchBackend;

/// JSの例外を文字列に（Errorなら message）
fn js_error(value: JsValue) -> TransportError {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return TransportError::new(String::from(err.message()));
    }
    match value.as_string() {
        Some(s) => TransportError::new(s),
        None => TransportError::new(format!("{:?}", value)),
    }
}

/// リクエスト送信とJSON取得（共通処理）
async fn send<R: DeserializeOwned>(request: Request) -> TransportResult<R> {
    let window = web_sys::window().ok_or_else(|| TransportError::new("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| TransportError::new(e.to_string()))
}

async fn post_json<Q: Serialize, R: DeserializeOwned>(endpoint: &str, body: &Q) -> TransportResult<R> {
    let body = serde_json::to_string(body)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    send(request).await
}

impl Backend for FetchBackend {
    type File = File;

    async fn upload(&self, file: &File) -> TransportResult<UploadResponse> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(UPLOAD_ENDPOINT, &opts).map_err(js_error)?;
        send(request).await
    }

    async fn thumbnails(&self, request: &ThumbnailsRequest) -> TransportResult<ThumbnailsResponse> {
        post_json(THUMBNAILS_ENDPOINT, request).await
    }

    async fn split(&self, request: &SplitRequest) -> TransportResult<SplitResponse> {
        post_json(SPLIT_ENDPOINT, request).await
    }

    async fn concat(&self, request: &ConcatRequest) -> TransportResult<ConcatResponse> {
        post_json(CONCAT_ENDPOINT, request).await
    }
}
