//! セッション状態
//!
//! ファイル選択から次の選択までの間だけ保持される。
//! `F` はローカルファイルのハンドル（CLIではパス、Webでは `web_sys::File`）。

#[derive(Debug, Clone)]
pub struct Session<F> {
    pub selected_file: Option<F>,
    /// プレーヤーに動画を読み込んだことがあるか（選択を取り消しても残る）
    pub video_loaded: bool,
    pub uploaded_filename: Option<String>,
    pub split_times: Vec<f64>,
    pub last_generated_thumbs: Vec<String>,
}

impl<F> Default for Session<F> {
    fn default() -> Self {
        Self {
            selected_file: None,
            video_loaded: false,
            uploaded_filename: None,
            split_times: Vec::new(),
            last_generated_thumbs: Vec::new(),
        }
    }
}

impl<F> Session<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択中ファイル以外をすべて初期化
    pub fn reset(&mut self) {
        self.uploaded_filename = None;
        self.split_times.clear();
        self.last_generated_thumbs.clear();
    }

    /// プレーヤーに動画が読み込まれているか
    pub fn has_video(&self) -> bool {
        self.video_loaded
    }
}
