//! 付加列の組み立て
//!
//! 元の行の後ろに、カタログごとの所蔵有無と検索URLを追加する。

use crate::catalog::Catalog;
use crate::record::{Header, Record};
use url::form_urlencoded;

/// 1レコード・1カタログの照会結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogOutcome {
    /// いずれかのISBNでヒット。ヒットしたISBNを保持
    Found { isbn: String },
    /// 全候補を照会してヒットなし（候補なしを含む）
    #[default]
    NotFound,
}

impl CatalogOutcome {
    pub fn found(isbn: impl Into<String>) -> Self {
        Self::Found { isbn: isbn.into() }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn matched_isbn(&self) -> Option<&str> {
        match self {
            Self::Found { isbn } => Some(isbn),
            Self::NotFound => None,
        }
    }
}

/// 出力ヘッダ: 元の列名 + カタログごとに (所蔵有無, 検索URL)
pub fn augmented_header(header: &Header, catalogs: &[Catalog]) -> Vec<String> {
    let mut columns = header.columns().to_vec();
    for catalog in catalogs {
        columns.push(catalog.found_column.to_string());
        columns.push(catalog.url_column.to_string());
    }
    columns
}

/// 書名検索用にエスケープ
///
/// 責任表示 ("/" 以降) を落とし、前後空白を除いてクエリ文字列形式でエンコードする。
pub fn url_ready_title(title: &str) -> String {
    let first_part = title.split('/').next().unwrap_or_default().trim();
    form_urlencoded::byte_serialize(first_part.as_bytes()).collect()
}

/// 出力行を組み立てる
///
/// `outcomes` は `catalogs` と同じ順・同じ長さ。
/// 元のフィールドは加工せずそのまま先頭に置く。
pub fn augment_row(
    record: &Record<'_>,
    outcomes: &[CatalogOutcome],
    catalogs: &[Catalog],
    title_column: &str,
) -> Vec<String> {
    debug_assert_eq!(outcomes.len(), catalogs.len());

    let title = url_ready_title(record.get(title_column).unwrap_or_default());

    let mut row = record.fields().to_vec();
    for (catalog, outcome) in catalogs.iter().zip(outcomes) {
        row.push(outcome.is_found().to_string());
        row.push(match outcome.matched_isbn() {
            Some(isbn) => catalog.hit_url(isbn),
            None => catalog.title_url(&title),
        });
    }
    row
}
