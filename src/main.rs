use anyhow::Context;
use clap::Parser;
use splitcut::{cli, config, http, workflow};
use cli::{Cli, Commands};
use config::Config;
use http::HttpBackend;
use splitcut_common::WorkflowController;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("設定の読み込みに失敗しました")?;
    let server = config.resolve_server(cli.server.as_deref());
    let timeout = config.timeout_seconds.map(Duration::from_secs);

    match cli.command {
        Commands::Run { file, count, at, interactive, no_thumbnails, no_concat, download } => {
            println!("🎬 splitcut - 一括処理 ({})\n", server);

            let backend = HttpBackend::new(&server, timeout)?;
            let mut controller = WorkflowController::new(backend)
                .with_thumbnail_count(count.unwrap_or(config.thumbnail_count));
            let options = workflow::RunOptions {
                split_times: at,
                interactive,
                skip_thumbnails: no_thumbnails,
                skip_concat: no_concat,
                download,
            };
            workflow::run(&mut controller, file, options).await?;
        }

        Commands::Upload { file } => {
            println!("📤 splitcut - アップロード ({})\n", server);

            let backend = HttpBackend::new(&server, timeout)?;
            let mut controller = WorkflowController::new(backend);
            match workflow::upload_only(&mut controller, file).await? {
                Some(name) => println!("\n✔ サーバー側ファイル名: {}", name),
                None => println!("\nサーバーからファイル名が返されませんでした"),
            }
        }

        Commands::Thumbnails { filename, count } => {
            let backend = HttpBackend::new(&server, timeout)?;
            let count = count.unwrap_or(config.thumbnail_count);
            let thumbs = workflow::thumbnails_only(&backend, filename, count).await?;
            println!("✔ {}枚のサムネイル", thumbs.len());
            for thumb in thumbs {
                println!("  {}", thumb);
            }
        }

        Commands::Split { filename, at } => {
            let backend = HttpBackend::new(&server, timeout)?;
            let segments = workflow::split_only(&backend, filename, at).await?;
            println!("✔ {}個のセグメント", segments.len());
            for segment in segments {
                println!("  {}", segment);
            }
        }

        Commands::Concat { files } => {
            let backend = HttpBackend::new(&server, timeout)?;
            match workflow::concat_only(&backend, files).await? {
                Some(output) => println!("✔ 連結結果: {}", output),
                None => println!("サーバーから出力パスが返されませんでした"),
            }
        }

        Commands::Config { set_server, set_thumbnail_count, show } => {
            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if let Some(count) = set_thumbnail_count {
                config.thumbnail_count = count;
                config.save()?;
                println!("✔ サムネイル枚数を設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url);
                println!("  接続先（実際）: {}", server);
                println!("  サムネイル枚数: {}", config.thumbnail_count);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "splitcut=debug,splitcut_common=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
