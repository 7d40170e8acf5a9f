//! プロジェクト・データセット選択パネル

use caption_prep_common::{Controller, RequestKind};
use leptos::prelude::*;

use crate::actions;

#[component]
pub fn ProjectPanel(ctrl: RwSignal<Controller>) -> impl IntoView {
    let is_loading = move || ctrl.with(|c| c.is_busy(RequestKind::Load));

    view! {
        <div class="project-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="project-select">"プロジェクト"</label>
                    <select
                        id="project-select"
                        on:change=move |ev| actions::choose_project(ctrl, event_target_value(&ev))
                    >
                        <option value="" disabled=true selected=move || ctrl.with(|c| c.project().is_empty())>
                            "-- 選択 --"
                        </option>
                        {move || {
                            ctrl.with(|c| {
                                c.projects()
                                    .iter()
                                    .map(|p| {
                                        let selected = p == c.project();
                                        view! { <option value=p.clone() selected=selected>{p.clone()}</option> }
                                    })
                                    .collect_view()
                            })
                        }}
                    </select>
                </div>

                <div class="form-group">
                    <label for="dataset-path-input">"データセットパス"</label>
                    <input
                        type="text"
                        id="dataset-path-input"
                        placeholder="dataset"
                        prop:value=move || ctrl.with(|c| c.dataset_path().to_string())
                        on:input=move |ev| {
                            ctrl.update(|c| c.set_dataset_path(event_target_value(&ev)));
                        }
                    />
                </div>
            </div>

            <div class="api-actions">
                <button
                    id="load-dataset-btn"
                    class="btn btn-primary"
                    disabled=is_loading
                    on:click=move |_| actions::load_dataset(ctrl)
                >
                    {move || if is_loading() { "読み込み中..." } else { "読み込み" }}
                </button>
                <button
                    id="openDatasetBtn"
                    class="btn btn-secondary"
                    on:click=move |_| actions::open_dataset_folder(ctrl)
                >
                    "フォルダを開く"
                </button>
            </div>

            <Show when=move || ctrl.with(|c| c.load_error().is_some())>
                <div id="dataset-error" class="error-box">
                    {move || ctrl.with(|c| c.load_error().unwrap_or_default().to_string())}
                </div>
            </Show>
        </div>
    }
}
