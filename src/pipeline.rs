//! ファイル単位の処理
//!
//! 入力TSVを1行ずつ読み、ISBN抽出 → カタログ照会 → 付加列追加 → 書き込み を繰り返す。
//! 行の順序は入力どおり。書き込みは1行ごとにフラッシュする。

use crate::catalog::{CatalogClient, CatalogSearch, SearchOutcome};
use crate::config::Config;
use crate::error::{GardenerError, Result};
use gardener_common::{
    augment_row, augmented_header, decode_row, extract_isbns, Catalog, Header, Record,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// ファイル処理の終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// 入力末尾まで処理した
    Completed { rows: usize },
    /// キャンセルにより途中で止めた
    Cancelled { rows: usize },
}

impl PipelineOutcome {
    /// 書き込んだデータ行数（ヘッダを除く）
    pub fn rows(&self) -> usize {
        match self {
            Self::Completed { rows } | Self::Cancelled { rows } => *rows,
        }
    }
}

/// 入力用TSVリーダ
///
/// タブで分割するだけで、引用符と文字コードは `decode_row` で解釈する。
/// 列数の検査は `Record` で行う。
pub fn tsv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input)
}

/// 出力用TSVライタ
///
/// タブ・引用符・改行を含むフィールドだけ引用符で囲む。
pub fn tsv_writer<W: Write>(output: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(output)
}

/// `dir/name.ext` → `dir/name{suffix}.ext`
///
/// 拡張子はファイル名の最後の `.` 以降。`.tsv` のようなドットファイルは
/// 名前全体が拡張子になる。
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let (stem, ext) = name.rfind('.').map_or((name.as_str(), ""), |i| name.split_at(i));
    input.with_file_name(format!("{}{}{}", stem, suffix, ext))
}

/// 絶対パスに変換（存在確認はしない）
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| GardenerError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

pub struct FilePipeline<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    catalogs: &'a [Catalog],
    config: &'a Config,
    cancel: &'a CancellationToken,
}

impl<'a, C: CatalogClient + ?Sized> FilePipeline<'a, C> {
    pub fn new(
        client: &'a C,
        catalogs: &'a [Catalog],
        config: &'a Config,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            client,
            catalogs,
            config,
            cancel,
        }
    }

    /// 入力ファイルを開き、隣に `*_augmented.*` を書き出す
    ///
    /// ファイルはどの終了経路でもドロップ時に閉じられる。
    pub async fn process_file(&self, filename: &Path) -> Result<PipelineOutcome> {
        debug!("処理開始: {}", filename.display());

        let abs_path = resolve_path(filename)?;
        debug!("絶対パス: {}", abs_path.display());

        let input = File::open(&abs_path).map_err(|source| GardenerError::FileOpen {
            path: abs_path.clone(),
            source,
        })?;

        let modified = output_path(&abs_path, &self.config.output_suffix);
        let output = File::create(&modified).map_err(|source| GardenerError::FileOpen {
            path: modified.clone(),
            source,
        })?;

        let mut reader = tsv_reader(input);
        let mut writer = tsv_writer(output);

        let outcome = self.process(&mut reader, &mut writer).await?;
        if matches!(outcome, PipelineOutcome::Cancelled { .. }) {
            debug!("処理をキャンセル: {}", abs_path.display());
        }
        Ok(outcome)
    }

    /// ヘッダ行 + データ行を処理する
    ///
    /// 新しい行に取りかかる前と外部クエリの前にキャンセルを確認する。
    /// キャンセル時、処理中の行は書き込まない。
    pub async fn process<R: Read, W: Write>(
        &self,
        reader: &mut csv::Reader<R>,
        writer: &mut csv::Writer<W>,
    ) -> Result<PipelineOutcome> {
        let mut raw = csv::ByteRecord::new();
        let mut rows = 0;

        if self.cancel.is_cancelled() {
            return Ok(PipelineOutcome::Cancelled { rows });
        }

        if !read_row(reader, &mut raw)? {
            return Ok(PipelineOutcome::Completed { rows });
        }
        let header = Header::new(decode_row(&raw));
        write_row(writer, &augmented_header(&header, self.catalogs))?;

        let search = CatalogSearch::new(
            self.client,
            self.catalogs,
            self.config.settle_delay(),
            self.cancel,
        );

        loop {
            if self.cancel.is_cancelled() {
                return Ok(PipelineOutcome::Cancelled { rows });
            }

            if !read_row(reader, &mut raw)? {
                break;
            }

            let record =
                Record::new(&header, decode_row(&raw)).map_err(|source| GardenerError::Record {
                    line: raw.position().map(|p| p.line()).unwrap_or_default(),
                    source,
                })?;
            debug!("{:?}", record.pairs().collect::<Vec<_>>());

            let isbns = extract_isbns(record.get(&self.config.isbn_column).unwrap_or_default());

            let outcomes = match search.search(&isbns).await? {
                SearchOutcome::Completed(outcomes) => outcomes,
                SearchOutcome::Cancelled => return Ok(PipelineOutcome::Cancelled { rows }),
            };

            let row = augment_row(&record, &outcomes, self.catalogs, &self.config.title_column);
            write_row(writer, &row)?;
            rows += 1;
        }

        Ok(PipelineOutcome::Completed { rows })
    }
}

/// 1行読む。入力末尾なら `false`
fn read_row<R: Read>(reader: &mut csv::Reader<R>, raw: &mut csv::ByteRecord) -> Result<bool> {
    reader
        .read_byte_record(raw)
        .map_err(|e| GardenerError::Parse(e.to_string()))
}

/// 1行書いてフラッシュする
fn write_row<W: Write>(writer: &mut csv::Writer<W>, row: &[String]) -> Result<()> {
    writer
        .write_record(row)
        .map_err(|e| GardenerError::Write(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| GardenerError::Write(format!("フラッシュ失敗: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_inserts_suffix() {
        assert_eq!(
            output_path(Path::new("/data/weeding.txt"), "_augmented"),
            PathBuf::from("/data/weeding_augmented.txt")
        );
        assert_eq!(
            output_path(Path::new("/data/list.2024.tsv"), "_augmented"),
            PathBuf::from("/data/list.2024_augmented.tsv")
        );
        assert_eq!(
            output_path(Path::new("/data/export"), "_augmented"),
            PathBuf::from("/data/export_augmented")
        );
    }

    #[test]
    fn test_output_path_dotfile_and_trailing_dot() {
        assert_eq!(
            output_path(Path::new("/data/.tsv"), "_augmented"),
            PathBuf::from("/data/_augmented.tsv")
        );
        assert_eq!(
            output_path(Path::new("/data/weeding."), "_augmented"),
            PathBuf::from("/data/weeding_augmented.")
        );
    }

    #[test]
    fn test_resolve_path() {
        let abs = resolve_path(Path::new("weeding.txt")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("weeding.txt"));

        let already = Path::new("/tmp/weeding.txt");
        assert_eq!(resolve_path(already).unwrap(), already);
    }

    #[test]
    fn test_tsv_reader_with_decode_row() {
        let data: &[u8] = b"020|a\tTitle\n\"0441013597\"\t\"Dune\tMessiah\"\nx\tCaf\xE9\n";
        let mut reader = tsv_reader(data);
        let rows: Vec<Vec<String>> = reader
            .byte_records()
            .map(|r| decode_row(&r.unwrap()))
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["0441013597", "Dune\tMessiah"]);
        assert_eq!(rows[2], vec!["x", "Café"]);
    }

    #[test]
    fn test_tsv_writer_quotes_only_when_needed() {
        let mut writer = tsv_writer(Vec::new());
        writer
            .write_record(["plain", "x y", "tab\there", "say \"hi\""])
            .unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "plain\tx y\t\"tab\there\"\t\"say \"\"hi\"\"\"\n"
        );
    }
}
