//! 行モデル
//!
//! TSVの1行を型付きで扱う。ヘッダは列名を小文字化・トリムした検索キーを持ち、
//! 出力用には元の列名をそのまま保持する。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// 列名の検索キーを作る（小文字化 + 前後空白除去）
fn lookup_key(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

/// ファイル先頭行から作られるヘッダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// 元の列名（出力順）
    columns: Vec<String>,
    /// 検索用キー
    keys: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        let keys = columns.iter().map(|c| lookup_key(c)).collect();
        Self { columns, keys }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }
}

/// データ行
///
/// フィールドは行ごとに所有し、列名→位置のマップはヘッダから毎行作り直す。
/// マップはヘッダを借用するので、ヘッダより長生きできない。
#[derive(Debug, Clone)]
pub struct Record<'h> {
    header: &'h Header,
    fields: Vec<String>,
    index: HashMap<&'h str, usize>,
}

impl<'h> Record<'h> {
    /// ヘッダと1行分のフィールドからレコードを作る
    ///
    /// 列数がヘッダと一致しない場合は `Error::FieldCount`。
    pub fn new(header: &'h Header, fields: Vec<String>) -> Result<Self> {
        if fields.len() != header.len() {
            return Err(Error::FieldCount {
                expected: header.len(),
                actual: fields.len(),
            });
        }

        // 同名列は後勝ち
        let index = header
            .keys()
            .iter()
            .enumerate()
            .map(|(i, key)| (key.as_str(), i))
            .collect();

        Ok(Self { header, fields, index })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// 位置で取得
    pub fn field(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(String::as_str)
    }

    /// 列名で取得（大文字小文字・前後空白を無視）
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = lookup_key(name);
        self.index.get(key.as_str()).and_then(|&i| self.field(i))
    }

    /// 列名→値の組をヘッダ順に返す（診断ログ用）
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.header
            .keys()
            .iter()
            .zip(self.fields.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
