//! Toast notices shown after a submission attempt.

use dioxus::prelude::*;
use signup::{Notice, NoticeLevel, Notifier};

/// How long a toast stays on screen before dismissing itself.
const TOAST_DURATION: std::time::Duration = std::time::Duration::from_secs(4);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast { id, notice });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// [`Notifier`] that pushes onto the toast signal.
#[derive(Clone, Copy)]
pub struct ToastNotifier(pub Signal<Toasts>);

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let mut toasts = self.0;
        let id = toasts.write().push(notice);

        spawn(async move {
            linger(TOAST_DURATION).await;
            toasts.write().dismiss(id);
        });
    }
}

async fn linger(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Provides the toast signal and renders the toasts above its children.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    rsx! {
        {children}
        ToastList {}
    }
}

#[component]
fn ToastList() -> Element {
    let mut toasts = use_toasts();
    let entries = toasts().entries.clone();

    rsx! {
        div {
            class: "fixed top-4 right-4 flex flex-col gap-2 z-50",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: match toast.notice.level {
                        NoticeLevel::Success => "px-4 py-3 rounded shadow bg-green-50 border border-green-200 text-green-700 text-sm",
                        NoticeLevel::Error => "px-4 py-3 rounded shadow bg-red-50 border border-red-200 text-red-600 text-sm",
                    },
                    onclick: move |_| toasts.write().dismiss(toast.id),
                    "{toast.notice}"
                }
            }
        }
    }
}
