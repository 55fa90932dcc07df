//! CLIからのワークフロー実行
//!
//! `run` は WorkflowController を通して一連の操作を行い、
//! ステータスログを追記されるたびに標準出力へ流す。
//! 単発コマンド（thumbnails/split/concat）はバックエンドを直接呼ぶ。

use crate::error::Result;
use crate::http::HttpBackend;
use crate::markers;
use indicatif::{ProgressBar, ProgressStyle};
use splitcut_common::{
    Action, ApiResponse, Backend, ConcatRequest, Error, SplitRequest, ThumbnailsRequest,
    TransportResult, UserInputError, WorkflowController,
};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// `run` の実行オプション
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub split_times: Vec<f64>,
    pub interactive: bool,
    pub skip_thumbnails: bool,
    pub skip_concat: bool,
    pub download: Option<PathBuf>,
}

/// ステータスログの未出力行を表示する
#[derive(Debug, Default)]
pub struct LogPrinter {
    printed: usize,
}

impl LogPrinter {
    pub fn reset(&mut self) {
        self.printed = 0;
    }

    /// 未出力の行を返し、出力済み位置を進める
    pub fn take_new<'a>(&mut self, lines: &'a [String]) -> &'a [String] {
        if lines.len() < self.printed {
            self.printed = 0;
        }
        let new = &lines[self.printed..];
        self.printed = lines.len();
        new
    }

    pub fn flush<B: Backend>(&mut self, controller: &WorkflowController<B>) {
        for line in self.take_new(controller.log().lines()) {
            println!("  {}", line);
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 待ち時間の間スピナーを表示
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let pb = spinner(message);
    let out = fut.await;
    pb.finish_and_clear();
    out
}

/// 選択 → アップロード → サムネイル → 分割 → 連結 を順に実行
pub async fn run(
    controller: &mut WorkflowController<HttpBackend>,
    file: PathBuf,
    options: RunOptions,
) -> Result<()> {
    let mut printer = LogPrinter::default();

    if !file.exists() {
        return Err(crate::error::SplitcutError::FileNotFound(file.display().to_string()));
    }
    // 分割位置がなければアップロード前に止める
    if options.split_times.is_empty() && !options.interactive {
        return Err(Error::from(UserInputError::NoSplitTimes).into());
    }

    println!("[1/5] ファイルを読み込み中...");
    controller.select_file(Some(file));
    printer.reset();
    printer.flush(controller);

    println!("[2/5] アップロード中...");
    let result = with_spinner("uploading", controller.upload()).await;
    printer.flush(controller);
    result?;

    if options.skip_thumbnails {
        println!("[3/5] サムネイル生成をスキップ");
    } else {
        println!("[3/5] サムネイル生成中...");
        let result = with_spinner("thumbnails", controller.generate_thumbnails()).await;
        printer.flush(controller);
        result?;
        for thumb in controller.thumbnails() {
            println!("    {}", thumb);
        }
    }

    println!("[4/5] 分割中...");
    let mut positions = options.split_times.clone();
    if options.interactive {
        positions.extend(markers::prompt_split_positions()?);
    }
    for position in positions {
        controller.add_split_marker(Some(position))?;
    }
    printer.flush(controller);
    let result = with_spinner("splitting", controller.run_split()).await;
    printer.flush(controller);
    result?;

    if options.skip_concat {
        println!("[5/5] 連結をスキップ");
    } else {
        println!("[5/5] 連結中...");
        if options.interactive && !controller.segments().is_empty() {
            let drop = markers::prompt_segments_to_drop(controller.segments().links())?;
            for index in drop {
                controller.remove_segment(index);
            }
            printer.flush(controller);
        }
        let result = with_spinner("concatenating", controller.concat()).await;
        printer.flush(controller);
        result?;
    }

    if let Some(dir) = options.download {
        download_links(controller, &dir).await?;
    }

    println!("\n✅ 完了");
    Ok(())
}

/// 連結結果があればそれを、なければ全セグメントを保存
async fn download_links(controller: &WorkflowController<HttpBackend>, dir: &std::path::Path) -> Result<()> {
    let hrefs: Vec<String> = match controller.last_output() {
        Some(output) => vec![output.href.clone()],
        None => controller.segments().links().iter().map(|l| l.href.clone()).collect(),
    };
    for href in hrefs {
        let saved = with_spinner("downloading", controller.backend().download(&href, dir)).await?;
        info!(href = %href, "downloaded");
        println!("✔ 保存: {}", saved.display());
    }
    Ok(())
}

/// アップロードのみ実行し、サーバー側ファイル名を返す
pub async fn upload_only(
    controller: &mut WorkflowController<HttpBackend>,
    file: PathBuf,
) -> Result<Option<String>> {
    if !file.exists() {
        return Err(crate::error::SplitcutError::FileNotFound(file.display().to_string()));
    }
    let mut printer = LogPrinter::default();
    controller.select_file(Some(file));
    let result = with_spinner("uploading", controller.upload()).await;
    printer.flush(controller);
    result?;
    Ok(controller.uploaded_filename().map(str::to_string))
}

/// レスポンスの `error` を検査して成功時の中身を返す
pub fn checked<R: ApiResponse>(action: Action, outcome: TransportResult<R>) -> Result<R> {
    let response = outcome.map_err(|e| Error::Transport {
        action,
        message: e.0,
    })?;
    match response.error_message() {
        Some(message) => Err(Error::Application { action, message }.into()),
        None => Ok(response),
    }
}

pub async fn thumbnails_only(backend: &HttpBackend, filename: String, count: u32) -> Result<Vec<String>> {
    let request = ThumbnailsRequest { filename, count };
    let outcome = with_spinner("thumbnails", backend.thumbnails(&request)).await;
    Ok(checked(Action::Thumbnails, outcome)?.thumbs.unwrap_or_default())
}

/// 分割位置は負数・非有限値を0に寄せてから送る
pub async fn split_only(backend: &HttpBackend, filename: String, times: Vec<f64>) -> Result<Vec<String>> {
    let request = SplitRequest {
        filename,
        times: times.into_iter().map(splitcut_common::split_position).collect(),
    };
    let outcome = with_spinner("splitting", backend.split(&request)).await;
    Ok(checked(Action::Split, outcome)?.segments.unwrap_or_default())
}

pub async fn concat_only(backend: &HttpBackend, files: Vec<String>) -> Result<Option<String>> {
    let request = ConcatRequest {
        files: files
            .into_iter()
            .map(|f| f.strip_prefix('/').map(str::to_string).unwrap_or(f))
            .collect(),
    };
    let outcome = with_spinner("concatenating", backend.concat(&request)).await;
    Ok(checked(Action::Concat, outcome)?.output)
}
