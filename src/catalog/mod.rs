//! カタログ照会
//!
//! 1レコード分のISBN候補を、設定済みカタログに順に照会する。
//! カタログごとに最初のヒットで打ち切り、全カタログがヒットしたら候補の走査も止める。

pub mod yaz_client;

pub use yaz_client::YazClient;

use crate::error::Result;
use async_trait::async_trait;
use gardener_common::{Catalog, CatalogOutcome};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 1つのISBNを1つのカタログに照会する境界インターフェース
///
/// 実装は外部プロセスでもテストダブルでもよい。
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// ヒットがあれば `true`
    async fn query(&self, isbn: &str, catalog: &Catalog) -> Result<bool>;
}

/// 1レコード分の照会結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `catalogs` と同順の結果
    Completed(Vec<CatalogOutcome>),
    /// 途中でキャンセルされた。このレコードは出力しない
    Cancelled,
}

/// 照会の実行コンテキスト
pub struct CatalogSearch<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    catalogs: &'a [Catalog],
    settle_delay: Duration,
    cancel: &'a CancellationToken,
}

impl<'a, C: CatalogClient + ?Sized> CatalogSearch<'a, C> {
    pub fn new(
        client: &'a C,
        catalogs: &'a [Catalog],
        settle_delay: Duration,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            client,
            catalogs,
            settle_delay,
            cancel,
        }
    }

    /// ISBN候補を順に照会する
    ///
    /// 外部クエリを出す直前に毎回キャンセルを確認する。
    /// クライアントのエラーはそのまま返す（リトライしない）。
    pub async fn search(&self, isbns: &[String]) -> Result<SearchOutcome> {
        let mut outcomes = vec![CatalogOutcome::NotFound; self.catalogs.len()];

        for isbn in isbns {
            if outcomes.iter().all(CatalogOutcome::is_found) {
                break;
            }

            debug!("ISBN: {}", isbn);

            for (catalog, outcome) in self.catalogs.iter().zip(outcomes.iter_mut()) {
                if outcome.is_found() {
                    continue;
                }

                if self.cancel.is_cancelled() {
                    return Ok(SearchOutcome::Cancelled);
                }

                let hit = self.client.query(isbn, catalog).await?;
                debug!("{} 照会結果: {}", catalog.name, hit);

                if hit {
                    *outcome = CatalogOutcome::found(isbn.as_str());
                }

                self.settle().await;
            }
        }

        Ok(SearchOutcome::Completed(outcomes))
    }

    /// クエリ間の待ち時間。キャンセル時は待たずに戻る
    async fn settle(&self) {
        if self.settle_delay.is_zero() {
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.settle_delay) => {}
            _ = self.cancel.cancelled() => {}
        }
    }
}
