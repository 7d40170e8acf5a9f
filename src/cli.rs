use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "caption-prep")]
#[command(about = "データセットのキャプション編集・自動キャプションツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのURL（例: http://127.0.0.1:5000）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// プロジェクト一覧を表示
    Projects,

    /// プロジェクト設定（既定のデータセットパス）を表示
    ProjectConfig {
        /// プロジェクト名
        #[arg(required = true)]
        project: String,
    },

    /// データセットを読み込んで対話的にキャプションを編集
    Edit {
        /// プロジェクト名（省略時は設定ファイルの既定値）
        #[arg(short, long)]
        project: Option<String>,

        /// データセットパス（省略時はプロジェクト設定の値）
        #[arg(short = 'd', long = "path")]
        dataset_path: Option<String>,
    },

    /// データセットを読み込んで自動キャプションを一括実行
    Autocaption {
        /// プロジェクト名（省略時は設定ファイルの既定値）
        #[arg(short, long)]
        project: Option<String>,

        /// データセットパス（省略時はプロジェクト設定の値）
        #[arg(short = 'd', long = "path")]
        dataset_path: Option<String>,

        /// 既存のキャプションも上書き
        #[arg(long)]
        overwrite: bool,
    },

    /// データセットフォルダを開く（サーバー側）
    OpenFolder {
        /// プロジェクト名（省略時は設定ファイルの既定値）
        #[arg(short, long)]
        project: Option<String>,
    },

    /// VRAM使用状況を表示
    Hud {
        /// 10秒ごとに表示し続ける
        #[arg(short, long)]
        watch: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 接続先URLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 既定のプロジェクトを設定
        #[arg(long)]
        set_project: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
