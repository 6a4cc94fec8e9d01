//! Well Connected Gardener
//!
//! 除籍候補リスト（TSV）の各レコードについて、ISBNで他館のZ39.50カタログを検索し、
//! 所蔵有無と検索URLを列として追加したファイルを書き出す。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod runner;
