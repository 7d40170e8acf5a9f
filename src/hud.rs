//! VRAM使用状況の表示

use std::time::Duration;

use caption_prep_common::api::HudStatus;
use caption_prep_common::Gateway;

use crate::error::Result;

/// ブラウザ版と同じ更新間隔
pub const HUD_POLL_INTERVAL: Duration = Duration::from_secs(10);

pub fn format_line(status: &HudStatus, timestamp: &str) -> String {
    match status.display_text() {
        Some(text) => format!("[{}] {}", timestamp, text),
        None => format!("[{}] (情報なし)", timestamp),
    }
}

pub async fn print_once<G: Gateway>(gateway: &G) -> Result<()> {
    let status = gateway.hud_status().await?;
    println!("{}", format_line(&status, &now()));
    Ok(())
}

/// Ctrl+C まで表示し続ける。取得失敗は表示せずに次の周期を待つ。
pub async fn watch<G: Gateway>(gateway: &G) -> Result<()> {
    let mut interval = tokio::time::interval(HUD_POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match gateway.hud_status().await {
                    Ok(status) => println!("{}", format_line(&status, &now())),
                    Err(err) => log::debug!("hud poll failed: {}", err),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

fn now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
