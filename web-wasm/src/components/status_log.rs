//! ステータスログコンポーネント

use leptos::html::Pre;
use leptos::prelude::*;

use crate::app::Controller;

#[component]
pub fn StatusLog(controller: Controller) -> impl IntoView {
    let log_ref = NodeRef::<Pre>::new();

    // 追記のたびに末尾までスクロール
    Effect::new(move |_| {
        controller.with(|c| c.log().len());
        if let Some(el) = log_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <pre class="status" node_ref=log_ref>
            {move || controller.with(|c| c.log().text())}
        </pre>
    }
}
