//! テスト用クライアントとフィクスチャ

#![allow(dead_code)]

use async_trait::async_trait;
use gardener_common::Catalog;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use well_connected_gardener::catalog::CatalogClient;
use well_connected_gardener::config::Config;
use well_connected_gardener::error::{GardenerError, Result};

pub const HEADER: &str = "Barcode\tTitle\t020|a";

/// 指定した (カタログ名, ISBN) でヒットし、呼び出しを記録するクライアント
#[derive(Default)]
pub struct StubClient {
    hits: Vec<(&'static str, &'static str)>,
    /// このISBNを受けたらエラー
    fail_on: Option<&'static str>,
    /// このISBNを受けたらトークンをキャンセル
    cancel_on: Option<(&'static str, CancellationToken)>,
    calls: Mutex<Vec<(String, &'static str)>>,
}

impl StubClient {
    pub fn with_hits(hits: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, isbn: &'static str) -> Self {
        self.fail_on = Some(isbn);
        self
    }

    pub fn cancelling_on(mut self, isbn: &'static str, token: CancellationToken) -> Self {
        self.cancel_on = Some((isbn, token));
        self
    }

    pub fn calls(&self) -> Vec<(String, &'static str)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for StubClient {
    async fn query(&self, isbn: &str, catalog: &Catalog) -> Result<bool> {
        self.calls.lock().unwrap().push((isbn.to_string(), catalog.name));

        if self.fail_on == Some(isbn) {
            return Err(GardenerError::ExternalQuery(format!("session failed for {}", isbn)));
        }
        if let Some((trigger, token)) = &self.cancel_on {
            if *trigger == isbn {
                token.cancel();
            }
        }

        Ok(self
            .hits
            .iter()
            .any(|&(name, hit)| name == catalog.name && hit == isbn))
    }
}

/// テスト用設定（待ち時間なし）
pub fn test_config() -> Config {
    Config {
        settle_delay_ms: 0,
        ..Config::default()
    }
}

/// ヘッダ + データ行でファイルを作る
pub fn write_input(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// ヘッダ + データ行 (バイト列) でファイルを作る
pub fn write_input_bytes(dir: &Path, name: &str, rows: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut content = format!("{}\n", HEADER).into_bytes();
    content.extend_from_slice(rows);
    std::fs::write(&path, content).unwrap();
    path
}

/// 出力TSVを引用符を解釈して読む
pub fn parse_output(output: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(output)
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
