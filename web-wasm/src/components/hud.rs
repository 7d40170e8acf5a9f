//! VRAM使用状況の表示

use caption_prep_common::Gateway;
use gloo::timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::FetchGateway;

const HUD_POLL_INTERVAL_MS: u32 = 10_000;

/// 10秒ごとに `/vram` を取得する。`text` がなければ非表示。
#[component]
pub fn Hud() -> impl IntoView {
    let (text, set_text) = signal(None::<String>);

    let poll = move || {
        spawn_local(async move {
            match FetchGateway.hud_status().await {
                Ok(status) => set_text.set(status.display_text().map(str::to_string)),
                // 取得失敗時は表示を変えない
                Err(err) => log::debug!("[hud] poll failed: {}", err),
            }
        });
    };

    poll();
    // ページ全体と同じ寿命
    Interval::new(HUD_POLL_INTERVAL_MS, poll).forget();

    view! {
        <div
            id="vram-hud"
            class="vram-hud"
            style:display=move || if text.get().is_some() { "block" } else { "none" }
        >
            {move || text.get().unwrap_or_default()}
        </div>
    }
}
