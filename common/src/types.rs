//! バックエンドとのやり取りに使う型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - *Request: `/thumbnails` `/split` `/concat` に送るJSON
//! - *Response: 各エンドポイントのレスポンス（`error` フィールド共通）

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UPLOAD_ENDPOINT: &str = "/upload";
pub const THUMBNAILS_ENDPOINT: &str = "/thumbnails";
pub const SPLIT_ENDPOINT: &str = "/split";
pub const CONCAT_ENDPOINT: &str = "/concat";

/// アップロード時のmultipartフィールド名
pub const UPLOAD_FIELD: &str = "file";

pub const DEFAULT_THUMBNAIL_COUNT: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailsRequest {
    pub filename: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub filename: String,
    pub times: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcatRequest {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// `error` フィールドを持つレスポンス
pub trait ApiResponse {
    fn error_field(&self) -> Option<&Value>;

    /// `error` が真値ならそのメッセージを返す
    ///
    /// 文字列はそのまま、それ以外の値はJSON表記で返す。
    fn error_message(&self) -> Option<String> {
        let value = self.error_field().filter(|v| is_truthy(v))?;
        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

macro_rules! impl_api_response {
    ($($ty:ty),*) => {
        $(impl ApiResponse for $ty {
            fn error_field(&self) -> Option<&Value> {
                self.error.as_ref()
            }
        })*
    };
}

impl_api_response!(UploadResponse, ThumbnailsResponse, SplitResponse, ConcatResponse);

/// JSON値の真偽判定（null / false / 0 / "" は偽）
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
