//! セグメント一覧コンポーネント
//!
//! 表示中のリンクがそのまま連結の入力になる。×で外したものは連結されない。

use leptos::prelude::*;
use splitcut_common::Action;

use crate::app::Controller;

#[component]
pub fn SegmentList<FC>(controller: Controller, on_concat: FC) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
{
    let is_concatenating = move || controller.with(|c| c.is_pending(Action::Concat));

    view! {
        <section class="segments-panel">
            <ul class="segments">
                {move || {
                    controller.with(|c| {
                        c.segments()
                            .links()
                            .iter()
                            .enumerate()
                            .map(|(index, link)| {
                                view! {
                                    <li>
                                        <a href=link.href.clone() target="_blank">{link.label.clone()}</a>
                                        <button
                                            class="btn btn-small btn-tertiary"
                                            title="Remove from list"
                                            on:click=move |_| {
                                                controller.update(|c| {
                                                    c.remove_segment(index);
                                                });
                                            }
                                        >
                                            "×"
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
                }}
            </ul>
            <button
                class="btn btn-primary"
                on:click={
                    let on_concat = on_concat.clone();
                    move |_| on_concat(())
                }
            >
                {move || if is_concatenating() { "Concatenating..." } else { "Concat segments" }}
            </button>
        </section>
    }
}
