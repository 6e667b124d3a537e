//! Transient notifications

use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn classes(self) -> &'static str {
        match self {
            Self::Success => "bg-green-600 text-white",
            Self::Error => "bg-red-600 text-white",
            Self::Warning => "bg-yellow-500 text-gray-900",
            Self::Info => "bg-blue-600 text-white",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }
}

/// Handle for showing a toast from callbacks and futures
#[derive(Clone)]
pub struct ToastHandle {
    state: UseStateHandle<Option<Toast>>,
}

impl ToastHandle {
    pub fn show(&self, toast: Toast) {
        self.state.set(Some(toast));
    }

    pub fn current(&self) -> Option<Toast> {
        (*self.state).clone()
    }
}

/// Toast state that clears itself after [`TOAST_DURATION_MS`]
#[hook]
pub fn use_toast() -> ToastHandle {
    let state = use_state(|| Option::<Toast>::None);

    {
        let state = state.clone();
        use_effect_with((*state).clone(), move |current| {
            // A newer toast drops the previous timer through this cleanup.
            let timeout = current.as_ref().map(|_| {
                let state = state.clone();
                Timeout::new(TOAST_DURATION_MS, move || state.set(None))
            });
            move || drop(timeout)
        });
    }

    ToastHandle { state }
}

#[derive(Properties, Clone, PartialEq)]
pub struct ToastViewProps {
    #[prop_or_default]
    pub toast: Option<Toast>,
}

#[function_component(ToastView)]
pub fn toast_view(props: &ToastViewProps) -> Html {
    let Some(toast) = &props.toast else {
        return html! {};
    };

    html! {
        <div
            role="status"
            class={classes!("fixed", "top-4", "right-4", "z-50", "px-4", "py-3", "rounded-lg", "shadow-lg", "text-sm", toast.kind.classes())}
        >
            {toast.message.clone()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Toast::success("ok").kind, ToastKind::Success);
        assert_eq!(Toast::error("no").kind, ToastKind::Error);
        assert_eq!(Toast::warning("hm").message, "hm");
    }

    #[test]
    fn every_kind_is_styled_differently() {
        let kinds = [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Warning,
            ToastKind::Info,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.classes(), b.classes());
            }
        }
    }
}
