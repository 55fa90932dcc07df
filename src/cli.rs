use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splitcut")]
#[command(about = "動画のアップロード・サムネイル生成・分割・連結クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 接続先サーバーURL（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アップロードから連結まで一括実行
    Run {
        /// ローカル動画ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// サムネイル枚数（デフォルト: 設定値）
        #[arg(short, long)]
        count: Option<u32>,

        /// 分割位置（秒、複数指定可）
        #[arg(short = 'a', long = "at", allow_negative_numbers = true)]
        at: Vec<f64>,

        /// 分割位置と連結対象を対話的に選ぶ
        #[arg(short, long)]
        interactive: bool,

        /// サムネイル生成をスキップ
        #[arg(long)]
        no_thumbnails: bool,

        /// 連結をスキップ
        #[arg(long)]
        no_concat: bool,

        /// 結果を保存するディレクトリ
        #[arg(short, long)]
        download: Option<PathBuf>,
    },

    /// アップロードのみ実行
    Upload {
        /// ローカル動画ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// アップロード済みファイルのサムネイルを生成
    Thumbnails {
        /// サーバー側ファイル名
        #[arg(required = true)]
        filename: String,

        /// サムネイル枚数
        #[arg(short, long)]
        count: Option<u32>,
    },

    /// アップロード済みファイルを分割
    Split {
        /// サーバー側ファイル名
        #[arg(required = true)]
        filename: String,

        /// 分割位置（秒、複数指定可）
        #[arg(short = 'a', long = "at", required = true, allow_negative_numbers = true)]
        at: Vec<f64>,
    },

    /// セグメントを連結
    Concat {
        /// サーバー側のセグメントパス
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 接続先サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// サムネイル枚数の既定値を設定
        #[arg(long)]
        set_thumbnail_count: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
