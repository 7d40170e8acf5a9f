//! キャプション編集・自動キャプション・保存

use caption_prep_common::view::{caption_editor_view, status_view};
use caption_prep_common::{Controller, RequestKind};
use leptos::prelude::*;

use crate::actions;

#[component]
pub fn CaptionEditor(ctrl: RwSignal<Controller>) -> impl IntoView {
    let (overwrite, set_overwrite) = signal(false);
    let editor = Memo::new(move |_| ctrl.with(|c| caption_editor_view(c.state())));
    let is_captioning = move || ctrl.with(|c| c.is_busy(RequestKind::AutoCaption));
    let is_saving = move || ctrl.with(|c| c.is_busy(RequestKind::Save));

    view! {
        <div class="caption-panel">
            <textarea
                id="caption-editor"
                rows="6"
                prop:value=move || editor.get().text
                disabled=move || !editor.get().enabled
                on:input=move |ev| {
                    ctrl.update(|c| c.edit_caption(event_target_value(&ev)));
                }
            />

            <div class="caption-actions">
                <label class="checkbox">
                    <input
                        type="checkbox"
                        id="autocaption-overwrite"
                        prop:checked=move || overwrite.get()
                        on:change=move |ev| set_overwrite.set(event_target_checked(&ev))
                    />
                    "既存のキャプションも上書き"
                </label>
                <button
                    id="autocaption-btn"
                    class="btn btn-secondary"
                    disabled=is_captioning
                    on:click=move |_| actions::auto_caption(ctrl, overwrite.get_untracked())
                >
                    {move || if is_captioning() { "生成中..." } else { "自動キャプション" }}
                </button>
                <button
                    id="save-captions-btn"
                    class="btn btn-primary"
                    disabled=move || is_saving() || !ctrl.with(|c| c.has_unsaved_changes())
                    on:click=move |_| actions::save_captions(ctrl)
                >
                    {move || if is_saving() { "保存中..." } else { "保存" }}
                </button>
            </div>

            {move || {
                ctrl.with(|c| {
                    c.notice().map(|notice| {
                        let text = notice.text().to_string();
                        let is_error = notice.is_error();
                        view! {
                            <div class="notice" class:error=is_error>
                                {text}
                                <button class="btn btn-tertiary btn-small" on:click=move |_| ctrl.update(|c| c.clear_notice())>
                                    "×"
                                </button>
                            </div>
                        }
                    })
                })
            }}

            <div class="status-line">{move || ctrl.with(|c| status_view(c.state()).summary())}</div>
        </div>
    }
}
