//! ワークフローコントローラ
//!
//! ファイル選択 → アップロード → サムネイル/分割マーカー → 分割 → 連結
//! の各操作を受け付け、セッション状態と表示モデルを更新する。
//!
//! ネットワークを使う操作は `begin_*` / `finish_*` に分かれている。
//! Web版はこの2つの間でfetchを待つため、コントローラを借用したまま
//! awaitしない。CLIとテストは両者をまとめた `async fn` を使う。

use tracing::{debug, info, warn};

use crate::backend::{Backend, TransportResult};
use crate::error::{Action, Error, Result, TransportError, UserInputError};
use crate::request::{RequestTracker, Ticket};
use crate::session::Session;
use crate::time::format_times;
use crate::types::{
    ApiResponse, ConcatRequest, ConcatResponse, SplitRequest, SplitResponse, ThumbnailsRequest,
    ThumbnailsResponse, UploadResponse, DEFAULT_THUMBNAIL_COUNT,
};
use crate::view::{LinkKind, SegmentLink, SegmentList, SplitMarkerList, StatusLog};

pub const FILE_LOADED_MESSAGE: &str = "Loaded local file in player - click Upload to send it to server.";

pub struct WorkflowController<B: Backend> {
    backend: B,
    session: Session<B::File>,
    markers: SplitMarkerList,
    segments: SegmentList,
    log: StatusLog,
    thumbnail_count: u32,
    requests: RequestTracker,
}

impl<B: Backend> WorkflowController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: Session::new(),
            markers: SplitMarkerList::default(),
            segments: SegmentList::default(),
            log: StatusLog::default(),
            thumbnail_count: DEFAULT_THUMBNAIL_COUNT,
            requests: RequestTracker::default(),
        }
    }

    pub fn with_thumbnail_count(mut self, count: u32) -> Self {
        self.thumbnail_count = count;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &Session<B::File> {
        &self.session
    }

    pub fn selected_file(&self) -> Option<&B::File> {
        self.session.selected_file.as_ref()
    }

    pub fn uploaded_filename(&self) -> Option<&str> {
        self.session.uploaded_filename.as_deref()
    }

    pub fn split_times(&self) -> &[f64] {
        &self.session.split_times
    }

    pub fn thumbnails(&self) -> &[String] {
        &self.session.last_generated_thumbs
    }

    pub fn markers(&self) -> &SplitMarkerList {
        &self.markers
    }

    pub fn segments(&self) -> &SegmentList {
        &self.segments
    }

    pub fn log(&self) -> &StatusLog {
        &self.log
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.requests.is_pending(action)
    }

    /// 最後に追加された連結結果のリンク
    pub fn last_output(&self) -> Option<&SegmentLink> {
        self.segments
            .links()
            .iter()
            .rev()
            .find(|link| link.kind == LinkKind::Output)
    }

    // ============================================
    // ファイル選択
    // ============================================

    /// ローカルファイルを選択してプレーヤーに読み込む
    ///
    /// `None` の場合は何もせず `false` を返す。
    pub fn select_file(&mut self, file: Option<B::File>) -> bool {
        let Some(file) = file else {
            return false;
        };
        self.session.selected_file = Some(file);
        self.session.video_loaded = true;
        self.reset();
        self.log.push(FILE_LOADED_MESSAGE);
        info!("local file selected");
        true
    }

    /// ファイル入力が空になった（選択を取り消した）
    ///
    /// プレーヤーの動画と作業中の状態はそのまま。次のアップロードは入力待ちになる。
    pub fn clear_selection(&mut self) {
        self.session.selected_file = None;
        debug!("file selection cleared");
    }

    /// セッション状態と表示をすべて初期化し、実行中のリクエストを無効にする
    pub fn reset(&mut self) {
        self.session.reset();
        self.markers.clear();
        self.segments.clear();
        self.log.clear();
        self.requests.invalidate_all();
    }

    // ============================================
    // アップロード
    // ============================================

    pub fn begin_upload(&mut self) -> Result<Ticket> {
        if self.session.selected_file.is_none() {
            return Err(UserInputError::NoFileSelected.into());
        }
        self.log.push("Uploading to server...");
        Ok(self.issue(Action::Upload))
    }

    pub fn finish_upload(
        &mut self,
        ticket: Ticket,
        outcome: TransportResult<UploadResponse>,
    ) -> Result<()> {
        let response = self.accept(ticket, outcome)?;
        match response.filename {
            Some(name) => {
                self.log.push(format!("Upload complete: {name}"));
                info!(filename = %name, "upload complete");
                self.session.uploaded_filename = Some(name);
            }
            None => {
                self.log.push("Upload complete: (no filename returned)");
                warn!("upload response carried no filename");
                self.session.uploaded_filename = None;
            }
        }
        Ok(())
    }

    pub async fn upload(&mut self) -> Result<()> {
        let ticket = self.begin_upload()?;
        let outcome = match self.session.selected_file.as_ref() {
            Some(file) => self.backend.upload(file).await,
            None => Err(TransportError::new("no file selected")),
        };
        self.finish_upload(ticket, outcome)
    }

    // ============================================
    // サムネイル
    // ============================================

    /// 表示中のサムネイルは応答を待たずに消す
    pub fn begin_thumbnails(&mut self) -> Result<(Ticket, ThumbnailsRequest)> {
        let filename = self
            .session
            .uploaded_filename
            .clone()
            .ok_or(UserInputError::NotUploaded)?;
        self.session.last_generated_thumbs.clear();
        self.log.push("Requesting thumbnails generation...");
        let request = ThumbnailsRequest {
            filename,
            count: self.thumbnail_count,
        };
        Ok((self.issue(Action::Thumbnails), request))
    }

    pub fn finish_thumbnails(
        &mut self,
        ticket: Ticket,
        outcome: TransportResult<ThumbnailsResponse>,
    ) -> Result<()> {
        let response = self.accept(ticket, outcome)?;
        self.log.push("Thumbnails generated. Rendering...");
        self.session.last_generated_thumbs = response.thumbs.unwrap_or_default();
        self.log.push("Thumbnails displayed.");
        info!(count = self.session.last_generated_thumbs.len(), "thumbnails received");
        Ok(())
    }

    pub async fn generate_thumbnails(&mut self) -> Result<()> {
        let (ticket, request) = self.begin_thumbnails()?;
        let outcome = self.backend.thumbnails(&request).await;
        self.finish_thumbnails(ticket, outcome)
    }

    // ============================================
    // 分割マーカー
    // ============================================

    /// 現在の再生位置を分割位置として追加
    ///
    /// 位置が取れない場合は0秒。保存値（小数点以下3桁）を返す。
    pub fn add_split_marker(&mut self, position: Option<f64>) -> Result<f64> {
        if !self.session.has_video() {
            return Err(UserInputError::NoVideoLoaded.into());
        }
        let position = position.filter(|p| p.is_finite()).unwrap_or(0.0).max(0.0);
        let marker = self.markers.push(position);
        let (seconds, label) = (marker.seconds, marker.label.clone());
        self.session.split_times.push(seconds);
        self.log.push(format!("Added split @ {label}"));
        debug!(seconds, "split marker added");
        Ok(seconds)
    }

    // ============================================
    // サーバー分割
    // ============================================

    pub fn begin_split(&mut self) -> Result<(Ticket, SplitRequest)> {
        let filename = self
            .session
            .uploaded_filename
            .clone()
            .ok_or(UserInputError::NotUploaded)?;
        if self.session.split_times.is_empty() {
            return Err(UserInputError::NoSplitTimes.into());
        }
        let times = self.session.split_times.clone();
        self.log.push(format!(
            "Requesting server split for times: {}",
            format_times(&times)
        ));
        Ok((self.issue(Action::Split), SplitRequest { filename, times }))
    }

    /// 成功時のみセグメント一覧を置き換える（空配列なら空にする）
    pub fn finish_split(
        &mut self,
        ticket: Ticket,
        outcome: TransportResult<SplitResponse>,
    ) -> Result<()> {
        let response = self.accept(ticket, outcome)?;
        self.log.push("Server split complete. Segments:");
        let segments = response.segments.unwrap_or_default();
        for segment in &segments {
            self.log.push(format!(" - {segment}"));
        }
        info!(count = segments.len(), "split complete");
        self.segments.replace_segments(segments);
        Ok(())
    }

    pub async fn run_split(&mut self) -> Result<()> {
        let (ticket, request) = self.begin_split()?;
        let outcome = self.backend.split(&request).await;
        self.finish_split(ticket, outcome)
    }

    // ============================================
    // 連結
    // ============================================

    /// 入力は表示中のリンク一覧から作る
    pub fn begin_concat(&mut self) -> Result<(Ticket, ConcatRequest)> {
        let files = self.segments.concat_inputs();
        if files.is_empty() {
            return Err(UserInputError::NoSegments.into());
        }
        let listed = serde_json::to_string(&files).unwrap_or_else(|_| format!("{files:?}"));
        self.log.push(format!("Requesting concat for {listed}"));
        Ok((self.issue(Action::Concat), ConcatRequest { files }))
    }

    pub fn finish_concat(
        &mut self,
        ticket: Ticket,
        outcome: TransportResult<ConcatResponse>,
    ) -> Result<()> {
        let response = self.accept(ticket, outcome)?;
        match response.output {
            Some(output) => {
                self.log.push(format!("Concat complete. Output: {output}"));
                info!(output = %output, "concat complete");
                self.segments.push_output(output);
            }
            None => {
                self.log.push("Concat complete. Output: (none)");
                warn!("concat response carried no output");
            }
        }
        Ok(())
    }

    pub async fn concat(&mut self) -> Result<()> {
        let (ticket, request) = self.begin_concat()?;
        let outcome = self.backend.concat(&request).await;
        self.finish_concat(ticket, outcome)
    }

    /// 表示中のリンクを1件取り除く（次の連結対象から外れる）
    pub fn remove_segment(&mut self, index: usize) -> Option<SegmentLink> {
        let removed = self.segments.remove(index)?;
        self.log.push(format!("Removed {} from list", removed.href));
        Some(removed)
    }

    // ============================================
    // 内部処理
    // ============================================

    fn issue(&mut self, action: Action) -> Ticket {
        debug!(%action, "request issued");
        self.requests.issue(action)
    }

    /// レスポンスを検査し、成功時のみ中身を返す
    ///
    /// 失敗はステータスログに1行残してからエラーとして返す。
    fn accept<R: ApiResponse>(&mut self, ticket: Ticket, outcome: TransportResult<R>) -> Result<R> {
        let action = ticket.action;
        if !self.requests.settle(&ticket) {
            warn!(%action, "discarding stale response");
            return Err(Error::Stale(action));
        }
        let error = match outcome {
            Ok(response) => match response.error_message() {
                None => return Ok(response),
                Some(message) => Error::Application { action, message },
            },
            Err(TransportError(message)) => Error::Transport { action, message },
        };
        warn!(%error, "request failed");
        self.log.push(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Upload(String),
        Thumbnails(ThumbnailsRequest),
        Split(SplitRequest),
        Concat(ConcatRequest),
    }

    struct MockBackend {
        calls: RefCell<Vec<Call>>,
        upload: TransportResult<UploadResponse>,
        thumbnails: TransportResult<ThumbnailsResponse>,
        split: TransportResult<SplitResponse>,
        concat: TransportResult<ConcatResponse>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                upload: Ok(UploadResponse {
                    filename: Some("v1.mp4".into()),
                    ..Default::default()
                }),
                thumbnails: Ok(ThumbnailsResponse {
                    thumbs: Some(vec!["t1.jpg".into(), "t2.jpg".into()]),
                    ..Default::default()
                }),
                split: Ok(SplitResponse {
                    segments: Some(vec!["s1.mp4".into(), "s2.mp4".into()]),
                    ..Default::default()
                }),
                concat: Ok(ConcatResponse {
                    output: Some("out.mp4".into()),
                    ..Default::default()
                }),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl Backend for MockBackend {
        type File = String;

        async fn upload(&self, file: &String) -> TransportResult<UploadResponse> {
            self.calls.borrow_mut().push(Call::Upload(file.clone()));
            self.upload.clone()
        }

        async fn thumbnails(&self, request: &ThumbnailsRequest) -> TransportResult<ThumbnailsResponse> {
            self.calls.borrow_mut().push(Call::Thumbnails(request.clone()));
            self.thumbnails.clone()
        }

        async fn split(&self, request: &SplitRequest) -> TransportResult<SplitResponse> {
            self.calls.borrow_mut().push(Call::Split(request.clone()));
            self.split.clone()
        }

        async fn concat(&self, request: &ConcatRequest) -> TransportResult<ConcatResponse> {
            self.calls.borrow_mut().push(Call::Concat(request.clone()));
            self.concat.clone()
        }
    }

    fn app_error(message: &str) -> Option<serde_json::Value> {
        Some(serde_json::Value::String(message.to_string()))
    }

    fn uploaded(backend: MockBackend) -> WorkflowController<MockBackend> {
        let mut controller = WorkflowController::new(backend);
        controller.select_file(Some("clip.mp4".to_string()));
        block_on(controller.upload()).expect("upload");
        controller
    }

    #[test]
    fn test_select_none_is_noop() {
        let mut controller = WorkflowController::new(MockBackend::new());
        assert!(!controller.select_file(None));
        assert!(controller.log().is_empty());
        assert!(controller.selected_file().is_none());
    }

    #[test]
    fn test_cleared_selection_blocks_upload() {
        let mut controller = uploaded(MockBackend::new());
        controller.add_split_marker(Some(4.0)).unwrap();
        let log_len = controller.log().len();

        controller.clear_selection();

        assert_eq!(
            block_on(controller.upload()).unwrap_err(),
            Error::UserInput(UserInputError::NoFileSelected)
        );
        assert_eq!(controller.backend().calls().len(), 1);
        // 読み込み済みの動画と作業状態は残る
        assert_eq!(controller.uploaded_filename(), Some("v1.mp4"));
        assert_eq!(controller.add_split_marker(Some(6.0)).unwrap(), 6.0);
        assert_eq!(controller.split_times(), &[4.0, 6.0]);
        assert_eq!(controller.log().len(), log_len + 1);
    }

    #[test]
    fn test_select_resets_everything() {
        let mut controller = uploaded(MockBackend::new());
        block_on(controller.generate_thumbnails()).unwrap();
        controller.add_split_marker(Some(10.0)).unwrap();
        block_on(controller.run_split()).unwrap();

        assert!(controller.select_file(Some("other.mp4".to_string())));

        assert_eq!(controller.selected_file().map(String::as_str), Some("other.mp4"));
        assert!(controller.uploaded_filename().is_none());
        assert!(controller.split_times().is_empty());
        assert!(controller.thumbnails().is_empty());
        assert!(controller.markers().is_empty());
        assert!(controller.segments().is_empty());
        assert_eq!(controller.log().lines(), &[FILE_LOADED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_upload_without_file_makes_no_call() {
        let mut controller = WorkflowController::new(MockBackend::new());
        let err = block_on(controller.upload()).unwrap_err();
        assert_eq!(err, Error::UserInput(UserInputError::NoFileSelected));
        assert!(controller.backend().calls().is_empty());
    }

    #[test]
    fn test_upload_success_stores_filename() {
        let controller = uploaded(MockBackend::new());
        assert_eq!(controller.uploaded_filename(), Some("v1.mp4"));
        assert_eq!(controller.backend().calls(), vec![Call::Upload("clip.mp4".into())]);
        assert_eq!(
            controller.log().lines().last().map(String::as_str),
            Some("Upload complete: v1.mp4")
        );
    }

    #[test]
    fn test_upload_application_error_leaves_state() {
        let mut backend = MockBackend::new();
        backend.upload = Ok(UploadResponse {
            filename: None,
            error: app_error("disk full"),
        });
        let mut controller = WorkflowController::new(backend);
        controller.select_file(Some("clip.mp4".to_string()));

        let err = block_on(controller.upload()).unwrap_err();
        assert!(matches!(err, Error::Application { action: Action::Upload, .. }));
        assert!(controller.uploaded_filename().is_none());
        assert_eq!(
            controller.log().lines().last().map(String::as_str),
            Some("Upload error: disk full")
        );
    }

    #[test]
    fn test_upload_transport_error_logged() {
        let mut backend = MockBackend::new();
        backend.upload = Err(TransportError::new("connection refused"));
        let mut controller = WorkflowController::new(backend);
        controller.select_file(Some("clip.mp4".to_string()));

        let err = block_on(controller.upload()).unwrap_err();
        assert_eq!(err.to_string(), "Upload failed: connection refused");
        assert_eq!(
            controller.log().lines().last().map(String::as_str),
            Some("Upload failed: connection refused")
        );
        assert!(!controller.is_pending(Action::Upload));
    }

    #[test]
    fn test_thumbnails_without_upload_makes_no_call() {
        let mut controller = WorkflowController::new(MockBackend::new());
        controller.select_file(Some("clip.mp4".to_string()));

        let err = block_on(controller.generate_thumbnails()).unwrap_err();
        assert_eq!(err, Error::UserInput(UserInputError::NotUploaded));
        assert!(controller.backend().calls().is_empty());
    }

    #[test]
    fn test_thumbnails_rendered_in_order() {
        let mut controller = uploaded(MockBackend::new());
        block_on(controller.generate_thumbnails()).unwrap();

        assert_eq!(controller.thumbnails(), &["t1.jpg".to_string(), "t2.jpg".to_string()]);
        assert_eq!(
            controller.backend().calls().last(),
            Some(&Call::Thumbnails(ThumbnailsRequest {
                filename: "v1.mp4".into(),
                count: 24
            }))
        );
    }

    #[test]
    fn test_thumbnail_count_configurable() {
        let mut controller = WorkflowController::new(MockBackend::new()).with_thumbnail_count(8);
        controller.select_file(Some("clip.mp4".to_string()));
        block_on(controller.upload()).unwrap();
        block_on(controller.generate_thumbnails()).unwrap();

        assert!(matches!(
            controller.backend().calls().last(),
            Some(Call::Thumbnails(ThumbnailsRequest { count: 8, .. }))
        ));
    }

    #[test]
    fn test_thumbnails_cleared_before_failure() {
        let mut controller = uploaded(MockBackend::new());
        block_on(controller.generate_thumbnails()).unwrap();
        assert_eq!(controller.thumbnails().len(), 2);

        let (ticket, _) = controller.begin_thumbnails().unwrap();
        assert!(controller.thumbnails().is_empty());

        let err = controller
            .finish_thumbnails(ticket, Err(TransportError::new("timeout")))
            .unwrap_err();
        assert_eq!(err.to_string(), "Thumbs failed: timeout");
        assert!(controller.thumbnails().is_empty());
    }

    #[test]
    fn test_thumbnails_missing_field_renders_empty() {
        let mut backend = MockBackend::new();
        backend.thumbnails = Ok(ThumbnailsResponse::default());
        let mut controller = uploaded(backend);

        block_on(controller.generate_thumbnails()).unwrap();
        assert!(controller.thumbnails().is_empty());
        assert_eq!(
            controller.log().lines().last().map(String::as_str),
            Some("Thumbnails displayed.")
        );
    }

    #[test]
    fn test_add_split_marker_requires_video() {
        let mut controller = WorkflowController::new(MockBackend::new());
        let err = controller.add_split_marker(Some(3.0)).unwrap_err();
        assert_eq!(err, Error::UserInput(UserInputError::NoVideoLoaded));
        assert!(controller.split_times().is_empty());
    }

    #[test]
    fn test_add_split_marker_rounds_and_formats() {
        let mut controller = WorkflowController::new(MockBackend::new());
        controller.select_file(Some("clip.mp4".to_string()));

        assert_eq!(controller.add_split_marker(Some(75.43219)).unwrap(), 75.432);
        assert_eq!(controller.add_split_marker(None).unwrap(), 0.0);
        assert_eq!(controller.add_split_marker(Some(f64::NAN)).unwrap(), 0.0);

        assert_eq!(controller.split_times(), &[75.432, 0.0, 0.0]);
        let labels: Vec<&str> = controller
            .markers()
            .markers()
            .iter()
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(labels, vec!["1:15", "0:00", "0:00"]);
        assert_eq!(controller.log().lines()[1], "Added split @ 1:15");
        assert!(controller.backend().calls().is_empty());
    }

    #[test]
    fn test_split_preconditions() {
        let mut controller = WorkflowController::new(MockBackend::new());
        controller.select_file(Some("clip.mp4".to_string()));
        controller.add_split_marker(Some(1.0)).unwrap();
        assert_eq!(
            block_on(controller.run_split()).unwrap_err(),
            Error::UserInput(UserInputError::NotUploaded)
        );

        let mut controller = uploaded(MockBackend::new());
        assert_eq!(
            block_on(controller.run_split()).unwrap_err(),
            Error::UserInput(UserInputError::NoSplitTimes)
        );
        assert_eq!(controller.backend().calls().len(), 1);
    }

    #[test]
    fn test_split_request_and_log() {
        let mut controller = uploaded(MockBackend::new());
        controller.add_split_marker(Some(10.0)).unwrap();
        controller.add_split_marker(Some(20.5)).unwrap();
        block_on(controller.run_split()).unwrap();

        assert_eq!(
            controller.backend().calls().last(),
            Some(&Call::Split(SplitRequest {
                filename: "v1.mp4".into(),
                times: vec![10.0, 20.5]
            }))
        );
        let lines = controller.log().lines();
        assert!(lines.contains(&"Requesting server split for times: [10,20.5]".to_string()));
        assert!(lines.contains(&" - s2.mp4".to_string()));
    }

    #[test]
    fn test_split_empty_segments_clears_list() {
        let mut backend = MockBackend::new();
        backend.split = Ok(SplitResponse {
            segments: Some(Vec::new()),
            ..Default::default()
        });
        let mut controller = uploaded(backend);
        controller.add_split_marker(Some(5.0)).unwrap();

        let (ticket, _) = controller.begin_split().unwrap();
        controller
            .finish_split(
                ticket,
                Ok(SplitResponse {
                    segments: Some(vec!["old.mp4".into()]),
                    ..Default::default()
                }),
            )
            .unwrap();
        assert_eq!(controller.segments().len(), 1);

        block_on(controller.run_split()).unwrap();
        assert!(controller.segments().is_empty());
    }

    #[test]
    fn test_split_error_keeps_previous_segments() {
        let mut controller = uploaded(MockBackend::new());
        controller.add_split_marker(Some(5.0)).unwrap();
        block_on(controller.run_split()).unwrap();

        let (ticket, _) = controller.begin_split().unwrap();
        let err = controller
            .finish_split(
                ticket,
                Ok(SplitResponse {
                    segments: None,
                    error: app_error("bad times"),
                }),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Split error: bad times");
        assert_eq!(controller.segments().concat_inputs(), vec!["s1.mp4", "s2.mp4"]);
    }

    #[test]
    fn test_concat_requires_segments() {
        let mut controller = uploaded(MockBackend::new());
        let err = block_on(controller.concat()).unwrap_err();
        assert_eq!(err, Error::UserInput(UserInputError::NoSegments));
        assert_eq!(controller.backend().calls().len(), 1);
    }

    #[test]
    fn test_concat_uses_rendered_list() {
        let mut backend = MockBackend::new();
        backend.split = Ok(SplitResponse {
            segments: Some(vec!["/seg/s1.mp4".into(), "/seg/s2.mp4".into(), "/seg/s3.mp4".into()]),
            ..Default::default()
        });
        let mut controller = uploaded(backend);
        controller.add_split_marker(Some(5.0)).unwrap();
        block_on(controller.run_split()).unwrap();

        let removed = controller.remove_segment(1).expect("segment");
        assert_eq!(removed.href, "/seg/s2.mp4");
        block_on(controller.concat()).unwrap();

        assert_eq!(
            controller.backend().calls().last(),
            Some(&Call::Concat(ConcatRequest {
                files: vec!["seg/s1.mp4".into(), "seg/s3.mp4".into()]
            }))
        );
    }

    #[test]
    fn test_second_concat_includes_output_link() {
        let mut controller = uploaded(MockBackend::new());
        controller.add_split_marker(Some(5.0)).unwrap();
        block_on(controller.run_split()).unwrap();
        block_on(controller.concat()).unwrap();
        block_on(controller.concat()).unwrap();

        assert_eq!(
            controller.backend().calls().last(),
            Some(&Call::Concat(ConcatRequest {
                files: vec!["s1.mp4".into(), "s2.mp4".into(), "out.mp4".into()]
            }))
        );
        assert_eq!(controller.segments().len(), 4);
    }

    #[test]
    fn test_concat_error_leaves_list() {
        let mut backend = MockBackend::new();
        backend.concat = Ok(ConcatResponse {
            output: None,
            error: serde_json::from_str("true").ok(),
        });
        let mut controller = uploaded(backend);
        controller.add_split_marker(Some(5.0)).unwrap();
        block_on(controller.run_split()).unwrap();

        let err = block_on(controller.concat()).unwrap_err();
        assert_eq!(err.to_string(), "Concat error: true");
        assert_eq!(controller.segments().len(), 2);
        assert!(controller.last_output().is_none());
    }

    #[test]
    fn test_stale_thumbnail_response_ignored() {
        let mut controller = uploaded(MockBackend::new());
        let (first, _) = controller.begin_thumbnails().unwrap();
        let (second, _) = controller.begin_thumbnails().unwrap();

        controller
            .finish_thumbnails(
                second,
                Ok(ThumbnailsResponse {
                    thumbs: Some(vec!["new.jpg".into()]),
                    ..Default::default()
                }),
            )
            .unwrap();
        let err = controller
            .finish_thumbnails(
                first,
                Ok(ThumbnailsResponse {
                    thumbs: Some(vec!["old.jpg".into()]),
                    ..Default::default()
                }),
            )
            .unwrap_err();

        assert_eq!(err, Error::Stale(Action::Thumbnails));
        assert_eq!(controller.thumbnails(), &["new.jpg".to_string()]);
    }

    #[test]
    fn test_response_after_reselect_is_stale() {
        let mut controller = WorkflowController::new(MockBackend::new());
        controller.select_file(Some("a.mp4".to_string()));
        let ticket = controller.begin_upload().unwrap();
        assert!(controller.is_pending(Action::Upload));

        controller.select_file(Some("b.mp4".to_string()));
        let err = controller
            .finish_upload(
                ticket,
                Ok(UploadResponse {
                    filename: Some("a-server.mp4".into()),
                    ..Default::default()
                }),
            )
            .unwrap_err();

        assert_eq!(err, Error::Stale(Action::Upload));
        assert!(controller.uploaded_filename().is_none());
        assert_eq!(controller.log().len(), 1);
    }

    #[test]
    fn test_end_to_end() {
        let mut controller = WorkflowController::new(MockBackend::new());
        controller.select_file(Some("clip.mp4".to_string()));
        block_on(controller.upload()).unwrap();
        block_on(controller.generate_thumbnails()).unwrap();
        assert_eq!(controller.thumbnails().len(), 2);

        controller.add_split_marker(Some(10.0)).unwrap();
        controller.add_split_marker(Some(20.0)).unwrap();
        block_on(controller.run_split()).unwrap();
        assert_eq!(controller.segments().len(), 2);

        block_on(controller.concat()).unwrap();
        let links = controller.segments().links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[2].href, "out.mp4");
        assert_eq!(links[2].label, "Download output");
        assert_eq!(controller.last_output().map(|l| l.href.as_str()), Some("out.mp4"));
    }
}
