//! yaz-client連携モジュール
//!
//! クエリごとにスクリプトを一時ファイルへ書き出し、`yaz-client -f` で実行する。
//! 標準出力の "Number of hits:" 行からヒット件数を読み取る。

use super::CatalogClient;
use crate::config::Config;
use crate::error::{GardenerError, Result};
use async_trait::async_trait;
use gardener_common::Catalog;
use regex::Regex;
use std::io::Write;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// 一時スクリプトのファイル名
const SCRIPT_PREFIX: &str = "well-connected-gardener-yaz-command.";
const SCRIPT_SUFFIX: &str = ".txt";

lazy_static::lazy_static! {
    static ref HIT_COUNT_RE: Regex = Regex::new(r"^Number of hits:\s*(\d+)").unwrap();
}

/// "Number of hits: 12, setno 1" から件数を取り出す
///
/// 該当しない行・数値にならない行は `None`。
pub fn parse_hit_count(line: &str) -> Option<u64> {
    HIT_COUNT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 出力全体に1件以上のヒット行があるか
pub fn contains_hit(output: &str) -> bool {
    output
        .lines()
        .filter_map(parse_hit_count)
        .any(|count| count > 0)
}

/// 外部 yaz-client プロセスを使うクライアント
#[derive(Debug, Clone)]
pub struct YazClient {
    command: String,
}

impl YazClient {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.client_command.as_str())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// `yaz-client -V` で実行可能か確認し、バージョン表示を返す
    pub async fn version_banner(&self) -> Result<String> {
        let output = Command::new(&self.command)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| GardenerError::ClientNotFound(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            return Err(GardenerError::ClientNotFound(format!(
                "{} -V 異常終了 (code {:?})",
                self.command,
                output.status.code()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// スクリプトを実行して標準出力を返す
    async fn run_script(&self, script: &str) -> Result<String> {
        let script_path = write_script(script)?;
        debug!("一時コマンドファイル作成: {}", script_path.display());

        let output = Command::new(&self.command)
            .arg("-f")
            .arg(&*script_path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| GardenerError::ExternalQuery(format!("{} 実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GardenerError::ExternalQuery(format!(
                "{} 異常終了 (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl CatalogClient for YazClient {
    async fn query(&self, isbn: &str, catalog: &Catalog) -> Result<bool> {
        let output = self.run_script(&catalog.query_script(isbn)).await?;
        Ok(contains_hit(&output))
    }
}

/// スクリプトを一時ファイルに書き出す。戻り値のドロップで削除される
fn write_script(script: &str) -> Result<tempfile::TempPath> {
    let script_error = |e: std::io::Error| {
        GardenerError::ExternalQuery(format!("一時コマンドファイルを作成できません: {}", e))
    };

    let mut file = tempfile::Builder::new()
        .prefix(SCRIPT_PREFIX)
        .suffix(SCRIPT_SUFFIX)
        .tempfile()
        .map_err(script_error)?;
    file.write_all(script.as_bytes()).map_err(script_error)?;
    file.as_file().sync_all().map_err(script_error)?;

    Ok(file.into_temp_path())
}
