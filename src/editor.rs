//! 対話式キャプション編集モジュール

use caption_prep_common::view::{self, ListEntry};
use caption_prep_common::{Completion, Gateway, Session};
use dialoguer::{Confirm, Editor, Input};

use crate::error::Result;
use crate::terminal;

const HELP: &str = "\
操作:
  [Enter]/n 次の画像   p 前の画像   <番号> 画像を選択
  e キャプション編集   E エディタで編集
  /<文字列> フィルタ   / フィルタ解除
  a 自動キャプション（空のみ）   A 自動キャプション（上書き）
  w 保存   r 再読み込み   o フォルダを開く   ? ヘルプ   q 終了";

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// 次の画像
    Next,
    /// 前の画像
    Prev,
    /// 番号で選択（0始まりのインデックス）
    Select(usize),
    /// フィルタを設定（空で解除）
    Filter(String),
    /// その場で編集
    Edit,
    /// $EDITOR で編集
    ExternalEdit,
    AutoCaption { overwrite: bool },
    Save,
    Reload,
    OpenFolder,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_action(input: &str) -> EditorAction {
    let trimmed = input.trim();

    if let Some(filter) = trimmed.strip_prefix('/') {
        return EditorAction::Filter(filter.trim().to_string());
    }

    match trimmed {
        "" | "n" => EditorAction::Next,
        "p" => EditorAction::Prev,
        "e" => EditorAction::Edit,
        "E" => EditorAction::ExternalEdit,
        "a" => EditorAction::AutoCaption { overwrite: false },
        "A" => EditorAction::AutoCaption { overwrite: true },
        "w" | "s" => EditorAction::Save,
        "r" => EditorAction::Reload,
        "o" => EditorAction::OpenFolder,
        "?" | "h" => EditorAction::Help,
        "q" | "Q" => EditorAction::Quit,
        _ => match trimmed.parse::<usize>() {
            Ok(number) if number > 0 => EditorAction::Select(number - 1),
            _ => EditorAction::Unknown(trimmed.to_string()),
        },
    }
}

/// 表示中のリストで隣の画像のインデックス
///
/// 選択中の画像がフィルタで隠れている場合は先頭（または末尾）。
pub fn neighbor(entries: &[ListEntry], forward: bool) -> Option<usize> {
    let position = entries.iter().position(|e| e.selected);
    let next = match (position, forward) {
        (Some(p), true) => entries.get(p + 1),
        (Some(p), false) => p.checked_sub(1).and_then(|p| entries.get(p)),
        (None, true) => entries.first(),
        (None, false) => entries.last(),
    };
    next.map(|e| e.index)
}

/// 対話式で編集
///
/// 呼び出し前にプロジェクトとデータセットパスを Controller に設定しておく。
pub async fn run_interactive_editor<G: Gateway>(session: &mut Session<G>, base_url: &str) -> Result<()> {
    load(session).await;

    println!("{}\n", HELP);
    show(session, base_url);

    loop {
        let input: String = Input::new()
            .with_prompt("操作 (?:ヘルプ)")
            .allow_empty(true)
            .interact_text()?;

        match parse_action(&input) {
            EditorAction::Next => step(session, true),
            EditorAction::Prev => step(session, false),
            EditorAction::Select(index) => {
                if index >= session.controller().state().len() {
                    println!("- 番号は 1〜{} で指定してください", session.controller().state().len());
                    continue;
                }
                session.controller_mut().select(index);
            }
            EditorAction::Filter(text) => {
                session.controller_mut().set_filter(text);
                terminal::print_status(session.controller());
                terminal::print_list(session.controller());
                continue;
            }
            EditorAction::Edit => {
                let Some(current) = selected_caption(session) else {
                    println!("- 画像が選択されていません");
                    continue;
                };
                let text: String = Input::new()
                    .with_prompt("キャプション")
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                session.controller_mut().edit_caption(text);
            }
            EditorAction::ExternalEdit => {
                let Some(current) = selected_caption(session) else {
                    println!("- 画像が選択されていません");
                    continue;
                };
                match Editor::new().edit(&current)? {
                    Some(text) => session.controller_mut().edit_caption(text.trim_end().to_string()),
                    None => println!("- 編集を中止しました"),
                }
            }
            EditorAction::AutoCaption { overwrite } => {
                let bar = terminal::spinner("自動キャプション生成中...");
                let completion = session.auto_caption(overwrite).await;
                bar.finish_and_clear();
                terminal::report(&completion, session.controller(), "キャプション生成の対象がありません");
            }
            EditorAction::Save => {
                save(session).await;
                continue;
            }
            EditorAction::Reload => {
                if session.controller().has_unsaved_changes()
                    && !confirm("未保存の変更を破棄して再読み込みしますか?")?
                {
                    continue;
                }
                load(session).await;
            }
            EditorAction::OpenFolder => match session.open_dataset_folder().await {
                Ok(()) => println!("✔ データセットフォルダを開きました"),
                Err(err) => println!("✘ フォルダを開けませんでした: {}", err),
            },
            EditorAction::Help => {
                println!("{}", HELP);
                continue;
            }
            EditorAction::Quit => {
                if session.controller().has_unsaved_changes() {
                    if confirm("未保存の変更があります。保存してから終了しますか?")? {
                        if !save(session).await {
                            continue;
                        }
                    } else if !confirm("保存せずに終了しますか?")? {
                        continue;
                    }
                }
                println!("終了します");
                break;
            }
            EditorAction::Unknown(text) => {
                println!("- 不明な操作です: {} (? でヘルプ)", text);
                continue;
            }
        }

        show(session, base_url);
    }

    Ok(())
}

async fn load<G: Gateway>(session: &mut Session<G>) {
    println!("データセットを読み込み中...");
    let completion = session.load_dataset().await;
    terminal::report(&completion, session.controller(), "");
}

/// 保存して成功したら true（変更なしも true）
async fn save<G: Gateway>(session: &mut Session<G>) -> bool {
    let bar = terminal::spinner("保存中...");
    let completion = session.save().await;
    bar.finish_and_clear();
    terminal::report(&completion, session.controller(), "保存する変更はありません");
    matches!(completion, Completion::Applied | Completion::Skipped)
}

fn step<G: Gateway>(session: &mut Session<G>, forward: bool) {
    let entries = view::list_view(session.controller().state());
    match neighbor(&entries, forward) {
        Some(index) => session.controller_mut().select(index),
        None => println!("- これ以上画像がありません"),
    }
}

fn show<G: Gateway>(session: &Session<G>, base_url: &str) {
    terminal::print_status(session.controller());
    terminal::print_list(session.controller());
    terminal::print_detail(session.controller(), base_url);
}

fn selected_caption<G: Gateway>(session: &Session<G>) -> Option<String> {
    session
        .controller()
        .state()
        .selected()
        .map(|img| img.caption.clone())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
