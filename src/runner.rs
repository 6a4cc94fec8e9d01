//! 実行制御
//!
//! 入力ファイルごとに独立したタスクを起動し、全タスクの終了を待つ。
//! キャンセルは1つのトークンを全タスクで共有する協調方式で、実行中の外部クエリは中断しない。

use crate::catalog::{CatalogClient, YazClient};
use crate::config::Config;
use crate::error::{GardenerError, Result};
use crate::pipeline::{FilePipeline, PipelineOutcome};
use gardener_common::{Catalog, CATALOGS};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 1ファイル分の処理結果
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<PipelineOutcome>,
}

impl FileReport {
    pub fn is_completed(&self) -> bool {
        matches!(self.result, Ok(PipelineOutcome::Completed { .. }))
    }
}

/// クライアントを確認してから全ファイルを処理する
///
/// 割り込みを受けたらキャンセルし、全タスクの終了を待ってから戻る。
pub async fn run(files: Vec<PathBuf>, config: Config) -> Result<Vec<FileReport>> {
    if files.is_empty() {
        return Err(GardenerError::NoInputFiles);
    }

    let client = YazClient::from_config(&config);
    let banner = client.version_banner().await?;
    debug!("{} -V", client.command());
    debug!("{}", banner.trim_end());

    let cancel = CancellationToken::new();
    let interrupt = install_interrupt_handler(cancel.clone());

    let reports = run_files(files, Arc::new(client), Arc::new(config), CATALOGS, cancel.clone()).await;

    interrupt.abort();
    if cancel.is_cancelled() {
        info!("完了");
    }

    Ok(reports)
}

/// 入力ファイルごとにタスクを起動し、すべて終わるまで待つ
///
/// 1ファイルの失敗は他のファイルに影響しない。
pub async fn run_files(
    files: Vec<PathBuf>,
    client: Arc<dyn CatalogClient>,
    config: Arc<Config>,
    catalogs: &'static [Catalog],
    cancel: CancellationToken,
) -> Vec<FileReport> {
    let workers: Vec<(PathBuf, JoinHandle<FileReport>)> = files
        .into_iter()
        .map(|path| {
            let client = Arc::clone(&client);
            let config = Arc::clone(&config);
            let cancel = cancel.clone();
            let task_path = path.clone();

            let handle = tokio::spawn(async move {
                let pipeline = FilePipeline::new(client.as_ref(), catalogs, &config, &cancel);
                let result = pipeline.process_file(&task_path).await;
                log_result(&task_path, &result);
                FileReport {
                    path: task_path,
                    result,
                }
            });

            (path, handle)
        })
        .collect();

    let mut reports = Vec::with_capacity(workers.len());
    for (path, handle) in workers {
        match handle.await {
            Ok(report) => reports.push(report),
            Err(e) => error!("{}: ワーカーが異常終了しました: {}", path.display(), e),
        }
    }
    reports
}

/// 最初の割り込みでキャンセルを発火する。2回目以降は何もしない
pub fn install_interrupt_handler(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    info!("キャンセル中...");
                    cancel.cancel();
                }
                Err(e) => warn!("割り込みハンドラを登録できません: {}", e),
            },
            _ = cancel.cancelled() => {}
        }
    })
}

fn log_result(path: &std::path::Path, result: &Result<PipelineOutcome>) {
    match result {
        Ok(PipelineOutcome::Completed { rows }) => {
            info!("{}: {}行を処理しました", path.display(), rows);
        }
        Ok(PipelineOutcome::Cancelled { rows }) => {
            info!("{}: キャンセル（{}行まで出力済み）", path.display(), rows);
        }
        Err(e) => error!("{}: 処理を中断しました: {}", path.display(), e),
    }
}
