//! ヘッダーコンポーネント

use leptos::prelude::*;

use crate::components::{hud::Hud, theme_select::ThemeSelect};

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Caption Prep - データセット キャプション編集"</h1>
            <div class="header-tools">
                <ThemeSelect />
                <Hud />
            </div>
        </header>
    }
}
