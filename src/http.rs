//! reqwestによるバックエンド実装
//!
//! エンドポイントはサーバーURLのルートからの相対パス。
//! レスポンスはステータスコードに関係なくJSONとして解釈する。

use crate::error::{Result, SplitcutError};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use splitcut_common::{
    Backend, ConcatRequest, ConcatResponse, SplitRequest, SplitResponse, ThumbnailsRequest,
    ThumbnailsResponse, TransportError, TransportResult, UploadResponse, CONCAT_ENDPOINT,
    SPLIT_ENDPOINT, THUMBNAILS_ENDPOINT, UPLOAD_ENDPOINT, UPLOAD_FIELD,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(server_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(server_url)
            .map_err(|e| SplitcutError::InvalidServerUrl(format!("{server_url}: {e}")))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// サーバー相対パスを絶対URLに解決
    pub fn resolve(&self, href: &str) -> Result<Url> {
        self.base
            .join(href)
            .map_err(|e| SplitcutError::InvalidServerUrl(format!("{href}: {e}")))
    }

    async fn post_json<Q, R>(&self, endpoint: &str, request: &Q) -> TransportResult<R>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let url = self.resolve(endpoint).map_err(transport)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        parse_body(response).await
    }

    /// 表示中のリンク（セグメント/連結結果）をローカルに保存
    pub async fn download(&self, href: &str, dest_dir: &Path) -> Result<PathBuf> {
        let url = self.resolve(href)?;
        let file_name = url
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SplitcutError::Download(format!("ファイル名を決定できません: {href}")))?
            .to_string();

        let mut response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(SplitcutError::Download(format!("{url}: {}", response.status())));
        }

        tokio::fs::create_dir_all(dest_dir).await?;
        let dest = dest_dir.join(file_name);
        let mut file = tokio::fs::File::create(&dest).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        debug!(dest = %dest.display(), "downloaded");
        Ok(dest)
    }
}

impl Backend for HttpBackend {
    type File = PathBuf;

    async fn upload(&self, file: &PathBuf) -> TransportResult<UploadResponse> {
        let url = self.resolve(UPLOAD_ENDPOINT).map_err(transport)?;
        let handle = tokio::fs::File::open(file).await?;
        let length = handle.metadata().await?.len();
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), length)
            .file_name(file_name);
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(%url, length, "POST multipart");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        parse_body(response).await
    }

    async fn thumbnails(&self, request: &ThumbnailsRequest) -> TransportResult<ThumbnailsResponse> {
        self.post_json(THUMBNAILS_ENDPOINT, request).await
    }

    async fn split(&self, request: &SplitRequest) -> TransportResult<SplitResponse> {
        self.post_json(SPLIT_ENDPOINT, request).await
    }

    async fn concat(&self, request: &ConcatRequest) -> TransportResult<ConcatResponse> {
        self.post_json(CONCAT_ENDPOINT, request).await
    }
}

async fn parse_body<R: DeserializeOwned>(response: reqwest::Response) -> TransportResult<R> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;
    debug!(%status, len = bytes.len(), "response");
    Ok(serde_json::from_slice(&bytes)?)
}

fn transport(err: impl std::fmt::Display) -> TransportError {
    TransportError::new(err.to_string())
}
