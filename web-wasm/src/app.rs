//! メインアプリケーションコンポーネント
//!
//! WorkflowController をシグナルに置き、各ボタンの操作を
//! begin_* → fetch → finish_* の順に流す。fetch中はコントローラを
//! 借用しないので、別の操作を並行して受け付けられる。

use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use splitcut_common::{Backend, Error, WorkflowController};
use web_sys::{File, Url};

use crate::api::FetchBackend;
use crate::components::{
    header::Header,
    player::Player,
    segment_list::SegmentList,
    split_markers::SplitMarkers,
    status_log::StatusLog,
    thumbnail_grid::ThumbnailGrid,
};

/// ページ全体で共有するコントローラ（web_sys::File を持つためローカル保持）
pub type Controller = RwSignal<WorkflowController<FetchBackend>, LocalStorage>;

/// 入力不足はモーダルで知らせる（その他の失敗はステータスログに残っている）
fn alert_user_input(err: &Error) {
    if err.is_user_input() {
        gloo::dialogs::alert(&err.to_string());
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let controller: Controller = RwSignal::new_local(WorkflowController::new(FetchBackend));
    let video_ref = NodeRef::<Video>::new();
    let (object_url, set_object_url) = signal(None::<String>);

    // ファイル選択ハンドラ
    let on_select = move |file: Option<File>| {
        if let Some(file) = file.as_ref() {
            if let Some(old) = object_url.get_untracked() {
                let _ = Url::revoke_object_url(&old);
            }
            match Url::create_object_url_with_blob(file) {
                Ok(url) => {
                    if let Some(video) = video_ref.get_untracked() {
                        video.set_src(&url);
                        video.load();
                    }
                    set_object_url.set(Some(url));
                }
                Err(err) => web_sys::console::error_1(&err),
            }
        }
        controller.update(|c| {
            if !c.select_file(file) {
                c.clear_selection();
            }
        });
    };

    // アップロードハンドラ
    let on_upload = move |_: ()| {
        let started = controller.try_update(|c| {
            c.begin_upload()
                .map(|ticket| (ticket, c.selected_file().cloned(), *c.backend()))
        });
        match started {
            Some(Ok((ticket, Some(file), backend))) => spawn_local(async move {
                let outcome = backend.upload(&file).await;
                controller.update(|c| {
                    let _ = c.finish_upload(ticket, outcome);
                });
            }),
            Some(Err(err)) => alert_user_input(&err),
            _ => {}
        }
    };

    // サムネイル生成ハンドラ
    let on_thumbnails = move |_: ()| {
        let started = controller.try_update(|c| {
            c.begin_thumbnails()
                .map(|(ticket, request)| (ticket, request, *c.backend()))
        });
        match started {
            Some(Ok((ticket, request, backend))) => spawn_local(async move {
                let outcome = backend.thumbnails(&request).await;
                controller.update(|c| {
                    let _ = c.finish_thumbnails(ticket, outcome);
                });
            }),
            Some(Err(err)) => alert_user_input(&err),
            None => {}
        }
    };

    // 分割マーカー追加ハンドラ（現在の再生位置）
    let on_add_split = move |_: ()| {
        let position = video_ref.get_untracked().map(|video| video.current_time());
        if let Some(Err(err)) = controller.try_update(|c| c.add_split_marker(position)) {
            alert_user_input(&err);
        }
    };

    // サーバー分割ハンドラ
    let on_split = move |_: ()| {
        let started = controller.try_update(|c| {
            c.begin_split()
                .map(|(ticket, request)| (ticket, request, *c.backend()))
        });
        match started {
            Some(Ok((ticket, request, backend))) => spawn_local(async move {
                let outcome = backend.split(&request).await;
                controller.update(|c| {
                    let _ = c.finish_split(ticket, outcome);
                });
            }),
            Some(Err(err)) => alert_user_input(&err),
            None => {}
        }
    };

    // 連結ハンドラ
    let on_concat = move |_: ()| {
        let started = controller.try_update(|c| {
            c.begin_concat()
                .map(|(ticket, request)| (ticket, request, *c.backend()))
        });
        match started {
            Some(Ok((ticket, request, backend))) => spawn_local(async move {
                let outcome = backend.concat(&request).await;
                controller.update(|c| {
                    let _ = c.finish_concat(ticket, outcome);
                });
            }),
            Some(Err(err)) => alert_user_input(&err),
            None => {}
        }
    };

    view! {
        <div class="container">
            <Header />

            <Player
                controller=controller
                video_ref=video_ref
                on_select=on_select
                on_upload=on_upload
            />

            <ThumbnailGrid controller=controller on_generate=on_thumbnails />

            <SplitMarkers controller=controller on_add=on_add_split on_split=on_split />

            <SegmentList controller=controller on_concat=on_concat />

            <StatusLog controller=controller />
        </div>
    }
}
