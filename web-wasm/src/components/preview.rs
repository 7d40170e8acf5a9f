//! 選択中画像のプレビュー

use caption_prep_common::view::{preview_view, PreviewView};
use caption_prep_common::Controller;
use leptos::prelude::*;

#[component]
pub fn Preview(ctrl: RwSignal<Controller>) -> impl IntoView {
    view! {
        <div id="image-preview" class="image-preview">
            {move || match ctrl.with(|c| preview_view(c.state())) {
                PreviewView::Image { src, alt } => view! { <img src=src alt=alt /> }.into_any(),
                PreviewView::Placeholder(text) => view! { <p class="text-muted">{text}</p> }.into_any(),
            }}
        </div>
    }
}
