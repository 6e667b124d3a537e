pub mod toast;

pub use toast::{Toast, ToastHandle, ToastKind, ToastView, use_toast};
