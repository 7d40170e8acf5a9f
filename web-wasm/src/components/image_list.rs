//! 画像リスト（フィルタ付き）

use caption_prep_common::view::list_view;
use caption_prep_common::Controller;
use leptos::prelude::*;

#[component]
pub fn ImageList(ctrl: RwSignal<Controller>) -> impl IntoView {
    view! {
        <div class="image-list-panel">
            <input
                type="text"
                id="image-filter"
                placeholder="ファイル名で絞り込み..."
                prop:value=move || ctrl.with(|c| c.state().filter().to_string())
                on:input=move |ev| {
                    ctrl.update(|c| c.set_filter(event_target_value(&ev)));
                }
            />
            <ul id="image-list" class="image-list">
                {move || {
                    ctrl.with(|c| list_view(c.state()))
                        .into_iter()
                        .map(|entry| {
                            let index = entry.index;
                            view! {
                                <li
                                    class="image-item"
                                    class:selected=entry.selected
                                    class:dirty=entry.dirty
                                    on:click=move |_| ctrl.update(|c| c.select(index))
                                >
                                    {entry.name}
                                    {entry.dirty.then(|| view! { <span class="dirty-mark">" ●"</span> })}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
