use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rfp-matcher")]
#[command(about = "RFP明細とサプライヤーカタログの照合・候補選定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 要求テキストをカタログと照合してJSONを出力
    Match {
        /// 要求テキストファイル（`-` 始まりの行が明細）
        #[arg(required = true)]
        input: PathBuf,

        /// カタログファイル（CSV/Excel）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 明細ごとの候補数
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// 出力JSONファイル（デフォルト: 入力ファイル名.matches.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 比較表Excelの出力先
        #[arg(short, long)]
        excel: Option<PathBuf>,
    },

    /// カタログを読み込んで内容を確認
    Catalog {
        /// カタログファイル（CSV/Excel）
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 候補数を設定
        #[arg(long)]
        set_top_n: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
