//! サムネイル一覧コンポーネント

use leptos::prelude::*;
use splitcut_common::Action;

use crate::app::Controller;

#[component]
pub fn ThumbnailGrid<FG>(controller: Controller, on_generate: FG) -> impl IntoView
where
    FG: Fn(()) + 'static + Clone,
{
    let is_generating = move || controller.with(|c| c.is_pending(Action::Thumbnails));

    view! {
        <section class="thumbs-panel">
            <button
                class="btn btn-secondary"
                on:click={
                    let on_generate = on_generate.clone();
                    move |_| on_generate(())
                }
            >
                {move || if is_generating() { "Generating..." } else { "Generate thumbnails" }}
            </button>
            <div class="thumbs">
                {move || {
                    controller.with(|c| {
                        c.thumbnails()
                            .iter()
                            .map(|src| view! { <img src=src.clone() /> })
                            .collect::<Vec<_>>()
                    })
                }}
            </div>
        </section>
    }
}
