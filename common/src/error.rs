//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// ヘッダとデータ行の列数不一致
    #[error("Parse error: expected {expected} fields, found {actual}")]
    FieldCount { expected: usize, actual: usize },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
