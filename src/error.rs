use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GardenerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("処理するファイルを1つ以上指定してください")]
    NoInputFiles,

    #[error("外部クライアントを実行できません: {0}")]
    ClientNotFound(String),

    #[error("絶対パスを取得できません: {path}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルを開けません: {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TSV解析エラー: {0}")]
    Parse(String),

    #[error("TSV解析エラー: {line} 行目: {source}")]
    Record {
        line: u64,
        #[source]
        source: gardener_common::Error,
    },

    #[error("外部クエリエラー: {0}")]
    ExternalQuery(String),

    #[error("書き込みエラー: {0}")]
    Write(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GardenerError>;
