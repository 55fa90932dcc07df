//! バックエンド呼び出しの抽象
//!
//! ネイティブ版（reqwest）とWeb版（fetch）がそれぞれ実装する。
//! WASMではFutureがSendにならないため、Send境界は付けない。

use crate::error::TransportError;
use crate::types::{
    ConcatRequest, ConcatResponse, SplitRequest, SplitResponse, ThumbnailsRequest,
    ThumbnailsResponse, UploadResponse,
};

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[allow(async_fn_in_trait)]
pub trait Backend {
    /// ローカルファイルのハンドル
    type File;

    async fn upload(&self, file: &Self::File) -> TransportResult<UploadResponse>;

    async fn thumbnails(&self, request: &ThumbnailsRequest) -> TransportResult<ThumbnailsResponse>;

    async fn split(&self, request: &SplitRequest) -> TransportResult<SplitResponse>;

    async fn concat(&self, request: &ConcatRequest) -> TransportResult<ConcatResponse>;
}
