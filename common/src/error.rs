//! エラー型定義

use std::fmt;
use thiserror::Error;

/// ネットワーク操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Upload,
    Thumbnails,
    Split,
    Concat,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Upload, Action::Thumbnails, Action::Split, Action::Concat];

    pub(crate) fn index(self) -> usize {
        match self {
            Action::Upload => 0,
            Action::Thumbnails => 1,
            Action::Split => 2,
            Action::Concat => 3,
        }
    }

    /// ステータスログ用の接頭辞
    pub fn label(&self) -> &'static str {
        match self {
            Action::Upload => "Upload",
            Action::Thumbnails => "Thumbs",
            Action::Split => "Split",
            Action::Concat => "Concat",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 前提条件の不足（ネットワーク呼び出し前に中断）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserInputError {
    #[error("Select a local video file first")]
    NoFileSelected,

    #[error("Upload file first")]
    NotUploaded,

    #[error("Load a video in the player first")]
    NoVideoLoaded,

    #[error("Add at least one split time")]
    NoSplitTimes,

    #[error("No segments found to concat (split first)")]
    NoSegments,
}

/// バックエンド呼び出し自体の失敗（通信・パース）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    UserInput(#[from] UserInputError),

    /// レスポンスJSONに `error` が含まれていた
    #[error("{action} error: {message}")]
    Application { action: Action, message: String },

    #[error("{action} failed: {message}")]
    Transport { action: Action, message: String },

    /// 後続のリクエストまたはファイル再選択で無効になったレスポンス
    #[error("stale {0} response discarded")]
    Stale(Action),
}

impl Error {
    pub fn is_user_input(&self) -> bool {
        matches!(self, Error::UserInput(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
