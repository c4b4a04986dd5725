//! Leptos Toast Utilities
//!
//! Transient notifications for Leptos with timed auto-dismiss.
//! A toast enters, stays visible for its duration, then leaves through a
//! short CSS transition before it is dropped from the queue.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Delay before an entering toast gets its `show` class (lets CSS transition run)
pub const ENTER_DELAY_MS: i32 = 10;
/// Time a leaving toast stays mounted for its exit transition
pub const LEAVE_ANIMATION_MS: i32 = 300;
/// Toasts beyond this count push the oldest ones out
pub const MAX_VISIBLE: usize = 5;

/// Toast severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "toast-success",
            Severity::Error => "toast-error",
            Severity::Warning => "toast-warning",
            Severity::Info => "toast-info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
            Severity::Warning => "!",
            Severity::Info => "i",
        }
    }
}

/// Lifecycle phase of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    /// Mounted, waiting for the enter transition
    Entering,
    Visible,
    /// Exit transition running, removed after `LEAVE_ANIMATION_MS`
    Leaving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub severity: Severity,
    /// 0 = sticky, closed only by the user or `close_all`
    pub duration_ms: u32,
    pub phase: ToastPhase,
}

/// Ordered toast list, oldest first
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast.
    /// Returns its id and the ids of older toasts that started leaving to
    /// keep at most `MAX_VISIBLE` active.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration_ms: u32) -> (u32, Vec<u32>) {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            duration_ms,
            phase: ToastPhase::Entering,
        });

        let active: Vec<u32> = self.toasts.iter()
            .filter(|t| t.phase != ToastPhase::Leaving)
            .map(|t| t.id)
            .collect();
        let mut evicted = Vec::new();
        if active.len() > MAX_VISIBLE {
            for old in &active[..active.len() - MAX_VISIBLE] {
                if self.begin_close(*old) {
                    evicted.push(*old);
                }
            }
        }
        (id, evicted)
    }

    pub fn mark_visible(&mut self, id: u32) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            if toast.phase == ToastPhase::Entering {
                toast.phase = ToastPhase::Visible;
            }
        }
    }

    /// Start the exit transition. False if the toast is gone or already leaving.
    pub fn begin_close(&mut self, id: u32) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if toast.phase != ToastPhase::Leaving => {
                toast.phase = ToastPhase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Start the exit transition on every toast, returning all ids now leaving
    pub fn begin_close_all(&mut self) -> Vec<u32> {
        self.toasts.iter_mut()
            .map(|t| {
                t.phase = ToastPhase::Leaving;
                t.id
            })
            .collect()
    }

    pub fn remove(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn get(&self, id: u32) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Toasts not yet leaving
    pub fn active_count(&self) -> usize {
        self.toasts.iter().filter(|t| t.phase != ToastPhase::Leaving).count()
    }

    /// Auto-dismiss delay for a toast; `None` keeps it until closed
    pub fn dismiss_delay(duration_ms: u32) -> Option<i32> {
        (duration_ms > 0).then(|| i32::try_from(duration_ms).unwrap_or(i32::MAX))
    }
}

/// Pending auto-dismiss timeout handles, one per toast
#[derive(Clone, Debug, Default)]
pub struct DismissTimers {
    handles: HashMap<u32, i32>,
}

impl DismissTimers {
    pub fn track(&mut self, id: u32, handle: i32) {
        self.handles.insert(id, handle);
    }

    /// Stop tracking `id`, returning its handle to clear
    pub fn take(&mut self, id: u32) -> Option<i32> {
        self.handles.remove(&id)
    }

    pub fn take_many(&mut self, ids: &[u32]) -> Vec<i32> {
        ids.iter().filter_map(|id| self.take(*id)).collect()
    }

    /// Stop tracking everything, returning all handles to clear
    pub fn drain(&mut self) -> Vec<i32> {
        self.handles.drain().map(|(_, h)| h).collect()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Toast state shared through context
#[derive(Clone, Copy)]
pub struct ToastSignals {
    pub queue: RwSignal<ToastQueue>,
    timers: StoredValue<DismissTimers>,
}

pub fn create_toast_signals() -> ToastSignals {
    ToastSignals {
        queue: RwSignal::new(ToastQueue::new()),
        timers: StoredValue::new(DismissTimers::default()),
    }
}

/// Create toast signals and provide them to all children
pub fn provide_toasts() -> ToastSignals {
    let toasts = create_toast_signals();
    provide_context(toasts);
    toasts
}

/// Get toast signals from context
pub fn use_toasts() -> ToastSignals {
    expect_context::<ToastSignals>()
}

impl ToastSignals {
    /// Show a toast; `duration_ms` of 0 keeps it until closed
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration_ms: u32) -> u32 {
        let (id, evicted) = self.queue
            .try_update(|q| q.push(message, severity, duration_ms))
            .unwrap_or_default();

        if !evicted.is_empty() {
            let handles = self.timers.try_update_value(|t| t.take_many(&evicted)).unwrap_or_default();
            clear_timeouts(handles);
            self.schedule_removal(evicted);
        }

        let queue = self.queue;
        set_timeout(move || queue.update(|q| q.mark_visible(id)), ENTER_DELAY_MS);

        if let Some(delay) = ToastQueue::dismiss_delay(duration_ms) {
            let this = *self;
            if let Some(handle) = set_timeout(move || this.close(id), delay) {
                self.timers.update_value(|t| t.track(id, handle));
            }
        }
        id
    }

    pub fn success(&self, message: impl Into<String>, duration_ms: u32) -> u32 {
        self.show(message, Severity::Success, duration_ms)
    }

    pub fn error(&self, message: impl Into<String>, duration_ms: u32) -> u32 {
        self.show(message, Severity::Error, duration_ms)
    }

    pub fn warning(&self, message: impl Into<String>, duration_ms: u32) -> u32 {
        self.show(message, Severity::Warning, duration_ms)
    }

    pub fn info(&self, message: impl Into<String>, duration_ms: u32) -> u32 {
        self.show(message, Severity::Info, duration_ms)
    }

    /// Close one toast early
    pub fn close(&self, id: u32) {
        self.cancel_timer(id);
        let started = self.queue.try_update(|q| q.begin_close(id)).unwrap_or(false);
        if started {
            self.schedule_removal(vec![id]);
        }
    }

    /// Close every toast and cancel all pending auto-dismiss timers
    pub fn close_all(&self) {
        let handles = self.timers.try_update_value(|t| t.drain()).unwrap_or_default();
        clear_timeouts(handles);

        let closing = self.queue.try_update(|q| q.begin_close_all()).unwrap_or_default();
        if !closing.is_empty() {
            self.schedule_removal(closing);
        }
    }

    fn cancel_timer(&self, id: u32) {
        let handle = self.timers.try_update_value(|t| t.take(id)).flatten();
        clear_timeouts(handle);
    }

    fn schedule_removal(&self, ids: Vec<u32>) {
        let queue = self.queue;
        set_timeout(
            move || queue.update(|q| ids.iter().for_each(|id| q.remove(*id))),
            LEAVE_ANIMATION_MS,
        );
    }
}

/// One-shot `window.setTimeout`, returning the handle
fn set_timeout(f: impl FnOnce() + 'static, ms: i32) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms).ok()
}

fn clear_timeouts(handles: impl IntoIterator<Item = i32>) {
    let Some(win) = web_sys::window() else { return };
    for handle in handles {
        win.clear_timeout_with_handle(handle);
    }
}

/// Close all toasts whenever the page navigates away or is hidden.
/// Covers full unloads, bfcache, history traversal and hash navigation.
pub fn bind_navigation_cleanup(toasts: ToastSignals) {
    let Some(win) = web_sys::window() else { return };

    for event in ["beforeunload", "pagehide", "popstate", "hashchange"] {
        let on_navigate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            toasts.close_all();
        });
        let _ = win.add_event_listener_with_callback(event, on_navigate.as_ref().unchecked_ref());
        on_navigate.forget();
    }

    if let Some(doc) = win.document() {
        let doc_ref = doc.clone();
        let on_visibility = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            if doc_ref.visibility_state() == web_sys::VisibilityState::Hidden {
                toasts.close_all();
            }
        });
        let _ = doc.add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref());
        on_visibility.forget();
    }
}

/// Renders the toast stack. Needs `provide_toasts` higher up.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || toasts.queue.with(|q| q.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let severity = toast.severity;
                    let toast_class = move || {
                        let phase = toasts.queue.with(|q| q.get(id).map(|t| t.phase));
                        match phase {
                            Some(ToastPhase::Visible) => format!("toast {} show", severity.css_class()),
                            Some(ToastPhase::Leaving) => format!("toast {} hide", severity.css_class()),
                            _ => format!("toast {}", severity.css_class()),
                        }
                    };

                    view! {
                        <div class=toast_class role="status">
                            <span class="toast-icon">{severity.icon()}</span>
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button
                                class="toast-close"
                                title="Close"
                                on:click=move |_| toasts.close(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::new();
        let (a, _) = queue.push("first", Severity::Info, 3000);
        let (b, _) = queue.push("second", Severity::Error, 3000);
        assert!(b > a);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(a).unwrap().phase, ToastPhase::Entering);
    }

    #[test]
    fn test_mark_visible_only_from_entering() {
        let mut queue = ToastQueue::new();
        let (id, _) = queue.push("saved", Severity::Success, 3000);
        queue.mark_visible(id);
        assert_eq!(queue.get(id).unwrap().phase, ToastPhase::Visible);

        // A late enter timer must not resurrect a leaving toast
        assert!(queue.begin_close(id));
        queue.mark_visible(id);
        assert_eq!(queue.get(id).unwrap().phase, ToastPhase::Leaving);
    }

    #[test]
    fn test_begin_close_is_idempotent() {
        let mut queue = ToastQueue::new();
        let (id, _) = queue.push("bye", Severity::Warning, 0);
        assert!(queue.begin_close(id));
        assert!(!queue.begin_close(id));
        assert!(!queue.begin_close(id + 100));
    }

    #[test]
    fn test_push_evicts_oldest_beyond_limit() {
        let mut queue = ToastQueue::new();
        let mut ids = Vec::new();
        for i in 0..MAX_VISIBLE {
            let (id, evicted) = queue.push(format!("toast {}", i), Severity::Info, 3000);
            assert!(evicted.is_empty());
            ids.push(id);
        }
        let (_, evicted) = queue.push("one too many", Severity::Info, 3000);
        assert_eq!(evicted, vec![ids[0]]);
        assert_eq!(queue.active_count(), MAX_VISIBLE);
        assert_eq!(queue.len(), MAX_VISIBLE + 1);
    }

    #[test]
    fn test_close_all_then_cleanup_leaves_nothing() {
        let mut queue = ToastQueue::new();
        queue.push("a", Severity::Info, 3000);
        let (b, _) = queue.push("b", Severity::Error, 0);
        queue.begin_close(b);
        queue.push("c", Severity::Success, 3000);

        let closing = queue.begin_close_all();
        assert_eq!(closing.len(), 3);
        assert_eq!(queue.active_count(), 0);

        // What the removal timer does after LEAVE_ANIMATION_MS
        for id in closing {
            queue.remove(id);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_duration_is_sticky() {
        assert_eq!(ToastQueue::dismiss_delay(0), None);
        assert_eq!(ToastQueue::dismiss_delay(4000), Some(4000));
        assert_eq!(ToastQueue::dismiss_delay(u32::MAX), Some(i32::MAX));
    }

    #[test]
    fn test_evicted_toasts_lose_their_timers() {
        let mut queue = ToastQueue::new();
        let mut timers = DismissTimers::default();
        let mut ids = Vec::new();
        for i in 0..MAX_VISIBLE {
            let (id, _) = queue.push(format!("toast {}", i), Severity::Info, 3000);
            timers.track(id, 100 + i as i32);
            ids.push(id);
        }

        let (newest, evicted) = queue.push("one too many", Severity::Info, 3000);
        timers.track(newest, 999);
        assert_eq!(timers.take_many(&evicted), vec![100]);
        assert!(!timers.contains(ids[0]));
        assert!(timers.contains(ids[1]));
        assert!(timers.contains(newest));
        assert_eq!(timers.len(), MAX_VISIBLE);
    }

    #[test]
    fn test_close_all_drains_timers() {
        let mut queue = ToastQueue::new();
        let mut timers = DismissTimers::default();
        for (i, duration) in [3000, 0, 5000].into_iter().enumerate() {
            let (id, _) = queue.push("x", Severity::Warning, duration);
            if ToastQueue::dismiss_delay(duration).is_some() {
                timers.track(id, i as i32);
            }
        }
        assert_eq!(timers.len(), 2);

        let mut handles = timers.drain();
        handles.sort();
        assert_eq!(handles, vec![0, 2]);
        assert!(timers.is_empty());
        assert_eq!(queue.begin_close_all().len(), 3);
    }

    #[test]
    fn test_take_unknown_timer() {
        let mut timers = DismissTimers::default();
        timers.track(1, 10);
        assert_eq!(timers.take(2), None);
        assert_eq!(timers.take(1), Some(10));
        assert_eq!(timers.take(1), None);
    }

    #[test]
    fn test_severity_classes() {
        assert_eq!(Severity::Success.css_class(), "toast-success");
        assert_eq!(Severity::Error.css_class(), "toast-error");
        assert_eq!(Severity::Warning.icon(), "!");
    }
}
