use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "well-connected-gardener", version)]
#[command(
    about = "Enhance weeding lists by adding search results from other library OPACs.",
    long_about = None
)]
pub struct Cli {
    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,

    /// 処理するTSVファイル
    pub files: Vec<PathBuf>,
}
