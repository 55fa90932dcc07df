//! ファイル選択・アップロード・プレーヤー

use leptos::html::Video;
use leptos::prelude::*;
use splitcut_common::Action;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::app::Controller;

#[component]
pub fn Player<FS, FU>(
    controller: Controller,
    video_ref: NodeRef<Video>,
    on_select: FS,
    on_upload: FU,
) -> impl IntoView
where
    FS: Fn(Option<File>) + 'static + Clone,
    FU: Fn(()) + 'static + Clone,
{
    let uploaded_name = move || {
        controller.with(|c| c.uploaded_filename().unwrap_or_default().to_string())
    };
    let is_uploading = move || controller.with(|c| c.is_pending(Action::Upload));

    view! {
        <section class="player-panel">
            <div class="file-row">
                <input
                    type="file"
                    accept="video/*"
                    on:change={
                        let on_select = on_select.clone();
                        move |ev: web_sys::Event| {
                            let file = ev
                                .target()
                                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                                .and_then(|input| input.files())
                                .and_then(|files| files.get(0));
                            on_select(file);
                        }
                    }
                />
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_upload = on_upload.clone();
                        move |_| on_upload(())
                    }
                >
                    {move || if is_uploading() { "Uploading..." } else { "Upload" }}
                </button>
                <span class="uploaded-name">{uploaded_name}</span>
            </div>
            <video node_ref=video_ref controls=true class="player"></video>
        </section>
    }
}
