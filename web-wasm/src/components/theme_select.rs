//! テーマ選択

use caption_prep_common::Theme;
use leptos::prelude::*;

use crate::browser;

#[component]
pub fn ThemeSelect() -> impl IntoView {
    let initial = browser::saved_theme();
    browser::apply_theme(initial);
    let (theme, set_theme) = signal(initial);

    // <select> の value は子要素より先に設定されるので、選択状態は <option> 側に持たせる
    view! {
        <select
            id="theme-select"
            class="theme-select"
            on:change=move |ev| {
                let selected = Theme::from_name(&event_target_value(&ev));
                browser::apply_theme(selected);
                set_theme.set(selected);
            }
        >
            {Theme::ALL
                .into_iter()
                .map(|t| {
                    view! {
                        <option value=t.as_str() selected=move || theme.get() == t>
                            {t.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
