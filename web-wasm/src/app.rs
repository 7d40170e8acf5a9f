//! メインアプリケーションコンポーネント

use caption_prep_common::Controller;
use leptos::prelude::*;

use crate::actions;
use crate::components::{
    caption_editor::CaptionEditor,
    header::Header,
    image_list::ImageList,
    preview::Preview,
    project_panel::ProjectPanel,
};

/// メインアプリケーションコンポーネント
///
/// 状態はコントローラ1つに集約し、各コンポーネントはそこから描画する。
#[component]
pub fn App() -> impl IntoView {
    let ctrl = RwSignal::new(Controller::new());

    actions::refresh_projects(ctrl);

    view! {
        <div class="container">
            <Header />

            <ProjectPanel ctrl=ctrl />

            <div class="dataset-layout">
                <ImageList ctrl=ctrl />
                <div class="dataset-detail">
                    <Preview ctrl=ctrl />
                    <CaptionEditor ctrl=ctrl />
                </div>
            </div>
        </div>
    }
}
