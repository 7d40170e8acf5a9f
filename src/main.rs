use caption_prep::{backend, cli, config, editor, error, hud, terminal};
use caption_prep_common::{Completion, Gateway, Session};
use clap::Parser;
use backend::HttpGateway;
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = Config::load()?;
    let server = config.resolve_server(cli.server.as_deref());
    log::debug!("server: {}", server);

    match cli.command {
        Commands::Projects => {
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            let projects = gateway.list_projects().await?;
            if projects.is_empty() {
                println!("プロジェクトがありません");
            }
            for project in projects {
                println!("{}", project);
            }
        }

        Commands::ProjectConfig { project } => {
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            let project_config = gateway.project_config(&project).await?;
            println!("プロジェクト: {}", project);
            println!("  データセットパス: {}", project_config.dataset_path);
        }

        Commands::Edit { project, dataset_path } => {
            println!("📝 caption-prep - キャプション編集\n");
            let project = config.resolve_project(project.as_deref())?;
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            let base_url = gateway.base_url().to_string();
            let mut session = Session::new(gateway);
            prepare(&mut session, &project, dataset_path).await;
            editor::run_interactive_editor(&mut session, &base_url).await?;
        }

        Commands::Autocaption { project, dataset_path, overwrite } => {
            println!("🤖 caption-prep - 自動キャプション\n");
            let project = config.resolve_project(project.as_deref())?;
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            let mut session = Session::new(gateway);
            prepare(&mut session, &project, dataset_path).await;

            // 1. 読み込み
            println!("[1/2] データセットを読み込み中...");
            let completion = session.load_dataset().await;
            terminal::report(&completion, session.controller(), "");
            if let Completion::Failed(message) = completion {
                return Err(error::CaptionPrepError::LoadFailed(message));
            }

            // 2. 生成（バックエンドがキャプションファイルに書き込む）
            println!("[2/2] キャプション生成中...{}", if overwrite { " (上書き)" } else { "" });
            let bar = terminal::spinner("生成中...");
            let completion = session.auto_caption(overwrite).await;
            bar.finish_and_clear();
            terminal::report(&completion, session.controller(), "キャプション生成の対象がありません");

            if completion.is_applied() {
                for img in session.controller().state().images() {
                    println!("  {}: {}", img.name, img.caption);
                }
                println!("\n✅ 完了");
            }
        }

        Commands::OpenFolder { project } => {
            let project = config.resolve_project(project.as_deref())?;
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            gateway.open_dataset_folder(&project).await?;
            println!("✔ データセットフォルダを開きました: {}", project);
        }

        Commands::Hud { watch } => {
            let gateway = HttpGateway::new(&server, config.timeout_seconds)?;
            if watch {
                hud::watch(&gateway).await?;
            } else {
                hud::print_once(&gateway).await?;
            }
        }

        Commands::Config { set_server, set_project, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server(url)?;
                config.save()?;
                println!("✔ 接続先を設定しました");
            }

            if let Some(project) = set_project {
                config.set_default_project(project);
                config.save()?;
                println!("✔ 既定のプロジェクトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  接続先: {}", config.server_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  既定のプロジェクト: {}",
                    config.default_project.as_deref().unwrap_or("未設定")
                );
                println!("  使用中の接続先: {}", server);
            }
        }
    }

    Ok(())
}

/// プロジェクトを選び、パス指定がなければプロジェクト設定の値を使う
async fn prepare(session: &mut Session<HttpGateway>, project: &str, dataset_path: Option<String>) {
    match dataset_path {
        Some(path) => {
            session.controller_mut().set_project(project);
            session.controller_mut().set_dataset_path(path);
        }
        None => {
            if let Completion::Failed(message) = session.choose_project(project).await {
                println!("✘ {}", message);
            }
        }
    }
    println!(
        "プロジェクト: {} / データセット: {}",
        project,
        session.controller().dataset_path()
    );
}
