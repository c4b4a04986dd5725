//! Camera Capture Component
//!
//! Live preview with Open / Capture / Retake / Stop for identity photos.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{Blob, MediaStream};

use crate::camera::{self, StreamSlot};
use crate::dialog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CameraState {
    Idle,
    Opening,
    Live,
    Captured,
}

/// Camera capture panel
///
/// # Arguments
/// * `on_capture` - Receives the JPEG blob of each captured still
/// * `active` - The camera is stopped whenever this turns false
#[component]
pub fn CameraCapture(
    #[prop(into)] on_capture: Callback<Blob>,
    #[prop(into)] active: Signal<bool>,
) -> impl IntoView {
    let video_ref = NodeRef::<html::Video>::new();
    let stream = StoredValue::new_local(StreamSlot::<MediaStream>::default());
    let (state, set_state) = signal(CameraState::Idle);
    let (preview_url, set_preview_url) = signal::<Option<String>>(None);

    let release_stream = move || {
        if let Some(s) = stream.try_update_value(|slot| slot.release()).flatten() {
            camera::stop_camera(&s, video_ref.get_untracked().as_ref());
        }
    };

    let clear_preview = move || {
        if let Some(url) = preview_url.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&url);
        }
        set_preview_url.set(None);
    };

    let open = move || {
        let Some(video) = video_ref.get_untracked() else { return };
        if !stream.try_update_value(|slot| slot.begin_open()).unwrap_or(false) {
            return;
        }
        set_state.set(CameraState::Opening);
        spawn_local(async move {
            match camera::open_camera(&video).await {
                Ok(s) => {
                    // None here means the panel is already gone
                    match stream.try_update_value(|slot| slot.adopt(s.clone())) {
                        Some(None) => set_state.set(CameraState::Live),
                        Some(Some(stale)) if stale == s => camera::stop_camera(&stale, Some(&video)),
                        Some(Some(replaced)) => {
                            camera::stop_camera(&replaced, None);
                            set_state.set(CameraState::Live);
                        }
                        None => camera::stop_camera(&s, None),
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[CAMERA] Open failed: {:?}", e).into());
                    set_state.set(CameraState::Idle);
                    dialog::alert(&e.to_string());
                }
            }
        });
    };

    let capture = move |_| {
        let Some(video) = video_ref.get_untracked() else { return };
        spawn_local(async move {
            match camera::capture_photo(&video).await {
                Ok(blob) => {
                    clear_preview();
                    if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                        set_preview_url.set(Some(url));
                    }
                    release_stream();
                    set_state.set(CameraState::Captured);
                    on_capture.run(blob);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[CAMERA] Capture failed: {:?}", e).into());
                    dialog::alert(&e.to_string());
                }
            }
        });
    };

    let retake = move |_| {
        clear_preview();
        open();
    };

    let stop = move |_| {
        release_stream();
        set_state.set(CameraState::Idle);
    };

    // Hidden tab or section: turn the camera off
    Effect::new(move |_| {
        if !active.get() && state.get_untracked() != CameraState::Captured {
            release_stream();
            set_state.set(CameraState::Idle);
        }
    });

    on_cleanup(move || {
        if let Some(s) = stream.try_update_value(|slot| slot.close()).flatten() {
            camera::stop_camera(&s, None);
        }
        clear_preview();
    });

    view! {
        <div class="camera-capture">
            <div class="camera-stage">
                // Preview is mirrored by CSS only
                <video
                    node_ref=video_ref
                    class="camera-preview mirrored"
                    class:hidden=move || !matches!(state.get(), CameraState::Live | CameraState::Opening)
                    autoplay=true
                    playsinline=true
                    prop:muted=true
                ></video>
                {move || preview_url.get().map(|url| view! {
                    <img class="camera-still" src=url alt="Captured photo" />
                })}
                <Show when=move || state.get() == CameraState::Idle>
                    <div class="camera-placeholder">"Camera is off"</div>
                </Show>
            </div>

            <div class="camera-actions">
                {move || match state.get() {
                    CameraState::Idle => view! {
                        <button type="button" class="btn btn-primary" on:click=move |_| open()>"Open camera"</button>
                    }.into_any(),
                    CameraState::Opening => view! {
                        <button type="button" class="btn" disabled=true>"Opening..."</button>
                    }.into_any(),
                    CameraState::Live => view! {
                        <button type="button" class="btn btn-primary" on:click=capture>"Capture"</button>
                        <button type="button" class="btn" on:click=stop>"Stop"</button>
                    }.into_any(),
                    CameraState::Captured => view! {
                        <button type="button" class="btn" on:click=retake>"Retake"</button>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
