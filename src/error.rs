use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitcutError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("サーバーURLが不正: {0}")]
    InvalidServerUrl(String),

    #[error("HTTPエラー: {0}")]
    Http(String),

    #[error("ダウンロード失敗: {0}")]
    Download(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    /// ワークフロー操作のエラー（メッセージはそのまま表示）
    #[error(transparent)]
    Workflow(#[from] splitcut_common::Error),
}

impl From<reqwest::Error> for SplitcutError {
    fn from(err: reqwest::Error) -> Self {
        SplitcutError::Http(err.to_string())
    }
}

impl From<dialoguer::Error> for SplitcutError {
    fn from(err: dialoguer::Error) -> Self {
        SplitcutError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SplitcutError>;
