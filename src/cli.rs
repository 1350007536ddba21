use clap::{Parser, Subcommand};
use std::path::PathBuf;
use top100_common::export::ExportFormat;
use top100_common::filter::{FacetState, SortOrder, ALL};
use top100_common::selection::TastingStatus;

#[derive(Parser)]
#[command(name = "top100")]
#[command(about = "Top 100 ワインカタログ・テイスティング記録ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 年度（省略時は最新年度）
    #[arg(short, long, global = true)]
    pub year: Option<i32>,

    /// データディレクトリ（wines-<year>.json の置き場所）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// 絞り込み条件（list / options 共通）
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// ワイン名・生産者名の検索語
    #[arg(short, long)]
    pub search: Option<String>,

    /// 色区分 (Red/White/Rosé/...)
    #[arg(long)]
    pub color: Option<String>,

    /// 国
    #[arg(long)]
    pub country: Option<String>,

    /// ワインタイプ (still/sparkling/...)
    #[arg(long)]
    pub wine_type: Option<String>,
}

impl FilterArgs {
    pub fn to_state(&self) -> FacetState {
        let pick = |v: &Option<String>| v.clone().unwrap_or_else(|| ALL.to_string());
        FacetState {
            search: self.search.clone().unwrap_or_default(),
            category: pick(&self.color),
            locale: pick(&self.country),
            sub_category: pick(&self.wine_type),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// ワイン一覧を表示
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// 並び順 (rank/score/price-low/price-high/name)
        #[arg(long, default_value = "rank")]
        sort: SortOrder,

        /// 表示件数の上限
        #[arg(short, long)]
        limit: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 絞り込みの選択肢を表示
    Options {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// ワインの詳細を表示
    Show {
        /// ワインid
        #[arg(required = true)]
        id: String,
    },

    /// テイスティングステータスを設定
    Taste {
        /// ワインid
        #[arg(required = true)]
        id: String,

        /// ステータス (tasted/want)
        #[arg(conflicts_with = "clear")]
        status: Option<TastingStatus>,

        /// ステータスを解除
        #[arg(long)]
        clear: bool,
    },

    /// 記録済みのワインを表示
    Saved {
        /// ステータスで絞り込み (tasted/want)
        #[arg(long)]
        status: Option<TastingStatus>,
    },

    /// テイスティングリストを出力
    Export {
        /// 出力形式 (csv/json/xlsx)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 共有リンクを生成
    Share {
        /// 共有先のベースURL
        #[arg(long, default_value = "https://top100.winespectator.com/lists/")]
        base_url: String,
    },

    /// 共有リンクの tasted を取り込む
    ImportShare {
        /// 共有リンク（URLまたはクエリ文字列）
        #[arg(required = true)]
        link: String,
    },

    /// ワインを比較（2〜3本）
    Compare {
        /// ワインid
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// ラベル画像URLを表示
    Label {
        /// ワインid
        #[arg(required = true)]
        id: String,

        /// 配信幅（px）
        #[arg(short, long)]
        width: Option<u32>,

        /// srcset も表示
        #[arg(long)]
        srcset: bool,
    },

    /// Personal Wine List に追加
    Pwl {
        /// ワインid
        #[arg(required = true)]
        id: String,
    },

    /// 編集部CSVを年度別JSON（wines-<year>.json）に変換
    Convert {
        /// 入力CSV
        input: PathBuf,

        /// 出力JSON
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// PWL APIのベースURLを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// PWLセッションを設定
        #[arg(long)]
        set_pwl_session: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
