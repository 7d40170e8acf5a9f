//! 端末への表示
//!
//! 表示モデル（`caption_prep_common::view`）を標準出力に書き出す。

use std::time::Duration;

use caption_prep_common::view::{self, PreviewView};
use caption_prep_common::{Completion, Controller};
use indicatif::{ProgressBar, ProgressStyle};

/// 画像リスト（選択中は `>`、未保存は `*`）
pub fn print_list(controller: &Controller) {
    let state = controller.state();
    let entries = view::list_view(state);

    if entries.is_empty() {
        if state.is_empty() {
            println!("  (画像がありません)");
        } else {
            println!("  (フィルタ \"{}\" に一致する画像がありません)", state.filter().trim());
        }
    }

    for entry in &entries {
        println!(
            "{} {}{:>4}. {}",
            if entry.selected { ">" } else { " " },
            if entry.dirty { "*" } else { " " },
            entry.index + 1,
            entry.name
        );
    }
}

/// 選択中の画像とキャプション
pub fn print_detail(controller: &Controller, base_url: &str) {
    println!();
    for line in detail_lines(controller, base_url) {
        println!("{}", line);
    }
}

/// 詳細表示の各行（画像URLはサーバーの完全なURL）
pub fn detail_lines(controller: &Controller, base_url: &str) -> Vec<String> {
    let state = controller.state();
    let mut lines = Vec::new();
    match view::preview_view(state) {
        PreviewView::Placeholder(text) => lines.push(text.to_string()),
        PreviewView::Image { src, alt } => {
            lines.push(format!("📷 {}", alt));
            lines.push(format!("   {}{}", base_url.trim_end_matches('/'), src));
        }
    }

    let editor = view::caption_editor_view(state);
    if editor.enabled {
        if editor.text.is_empty() {
            lines.push("   キャプション: (空)".to_string());
        } else {
            lines.push(format!("   キャプション: {}", editor.text));
        }
    }
    lines
}

pub fn print_status(controller: &Controller) {
    let status = view::status_view(controller.state());
    let filter = controller.state().filter().trim();
    if filter.is_empty() {
        println!("--- {} ---", status.summary());
    } else {
        println!("--- {} (フィルタ: {}) ---", status.summary(), filter);
    }
}

/// 操作結果を表示
pub fn report(completion: &Completion, controller: &Controller, skipped: &str) {
    match completion {
        Completion::Applied => {
            if let Some(notice) = controller.notice() {
                println!("✔ {}", notice.text());
            }
        }
        Completion::Skipped => println!("- {}", skipped),
        Completion::Stale => log::debug!("stale response ignored"),
        Completion::Failed(message) => println!("✘ {}", message),
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
