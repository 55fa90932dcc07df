//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"splitcut - 動画の分割と連結"</h1>
        </header>
    }
}
