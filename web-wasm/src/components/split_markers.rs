//! 分割マーカーコンポーネント

use leptos::prelude::*;
use splitcut_common::Action;

use crate::app::Controller;

#[component]
pub fn SplitMarkers<FA, FS>(controller: Controller, on_add: FA, on_split: FS) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone,
    FS: Fn(()) + 'static + Clone,
{
    let is_splitting = move || controller.with(|c| c.is_pending(Action::Split));

    view! {
        <section class="split-panel">
            <div class="split-actions">
                <button
                    class="btn btn-secondary"
                    on:click={
                        let on_add = on_add.clone();
                        move |_| on_add(())
                    }
                >
                    "Add split at current time"
                </button>
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_split = on_split.clone();
                        move |_| on_split(())
                    }
                >
                    {move || if is_splitting() { "Splitting..." } else { "Split on server" }}
                </button>
            </div>
            <ul class="split-list">
                {move || {
                    controller.with(|c| {
                        c.markers()
                            .markers()
                            .iter()
                            .map(|marker| view! { <li class="split-marker">{marker.label.clone()}</li> })
                            .collect::<Vec<_>>()
                    })
                }}
            </ul>
        </section>
    }
}
