use crate::error::{GardenerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Z39.50クライアントの実行ファイル
    pub client_command: String,
    /// 外部クエリごとの待ち時間（ミリ秒）
    pub settle_delay_ms: u64,
    /// 出力ファイル名に挿入する接尾辞
    pub output_suffix: String,
    /// ISBNサブフィールドの列名
    pub isbn_column: String,
    /// 書名の列名
    pub title_column: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければデフォルト設定
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GardenerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("well-connected-gardener")
            .join("config.json"))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_command: "yaz-client".into(),
            settle_delay_ms: 500, // カタログ側への配慮
            output_suffix: "_augmented".into(),
            isbn_column: "020|a".into(),
            title_column: "title".into(),
        }
    }
}
