//! Login page

use crate::client::api_client;
use crate::components::{Toast, ToastView, use_toast};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use taskgrid_client::{ClientError, Credentials, HealthStatus};
use tracing::{debug, error, info, warn};
use yew::prelude::*;

/// Delay between a successful login and the dashboard redirect
pub const REDIRECT_DELAY_MS: u32 = 1500;

/// Delay before the backend connectivity check after page load
pub const HEALTH_CHECK_DELAY_MS: u32 = 1000;

/// Whether a key press should submit the form
pub fn is_submit_key(key: &str) -> bool {
    key == "Enter"
}

/// Claim the in-flight slot for a login attempt
///
/// Returns `false` while another attempt is still outstanding.
pub fn begin_attempt(in_flight: &RefCell<bool>) -> bool {
    !in_flight.replace(true)
}

pub fn finish_attempt(in_flight: &RefCell<bool>) {
    in_flight.replace(false);
}

/// Message shown when a login attempt fails
pub fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Request(_) => {
            "Cannot reach the TaskGrid backend. Please try again.".to_string()
        }
        ClientError::Validation(message) | ClientError::Unauthorized(message) => message.clone(),
        other => format!("Error during login: {other}"),
    }
}

/// Notification for the result of the connectivity check
pub fn health_toast(result: &Result<HealthStatus, ClientError>) -> Toast {
    match result {
        Ok(_) => Toast::success("Connected to TaskGrid backend"),
        Err(ClientError::Request(_)) => {
            Toast::error("Cannot connect to backend. Make sure the server is running.")
        }
        Err(_) => Toast::warning("Backend connection issue"),
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let client = use_memo((), |_| api_client().map_err(|e| e.to_string()));
    let toast = use_toast();

    let username = use_state(String::new);
    let password = use_state(String::new);
    let is_loading = use_state(|| false);
    // Read synchronously, so a second Enter before the next render is ignored
    let in_flight = use_mut_ref(|| false);

    // Already logged in: skip the form
    {
        let client = client.clone();
        use_effect_with((), move |_| {
            if let Ok(client) = (*client).as_ref()
                && client.is_authenticated()
            {
                info!("Already authenticated, redirecting to dashboard");
                client.navigate(&client.config().pages.dashboard);
            }
        });
    }

    // Best-effort connectivity check
    {
        let client = client.clone();
        let toast = toast.clone();
        use_effect_with((), move |_| {
            let timeout = (*client).as_ref().ok().cloned().map(|client| {
                Timeout::new(HEALTH_CHECK_DELAY_MS, move || {
                    wasm_bindgen_futures::spawn_local(async move {
                        let result = client.health().await;
                        match &result {
                            Ok(_) => debug!("Backend connection successful"),
                            Err(e) => warn!("Backend connection check failed: {e}"),
                        }
                        toast.show(health_toast(&result));
                    });
                })
            });
            move || drop(timeout)
        });
    }

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_login = {
        let client = client.clone();
        let toast = toast.clone();
        let username = username.clone();
        let password = password.clone();
        let is_loading = is_loading.clone();
        let in_flight = in_flight.clone();

        Callback::from(move |_: ()| {
            let credentials = Credentials::new(&*username, (*password).clone());
            if let Err(e) = credentials.validate() {
                toast.show(Toast::error(e.to_string()));
                return;
            }

            let client = match (*client).as_ref() {
                Ok(client) => client.clone(),
                Err(e) => {
                    toast.show(Toast::error(e.clone()));
                    return;
                }
            };

            if !begin_attempt(&in_flight) {
                debug!("Login already in progress");
                return;
            }

            let toast = toast.clone();
            let is_loading = is_loading.clone();
            let in_flight = in_flight.clone();
            is_loading.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                match client.login(&credentials).await {
                    Ok(_) => {
                        toast.show(Toast::success("Login successful! Redirecting..."));
                        let dashboard = client.config().pages.dashboard.clone();
                        Timeout::new(REDIRECT_DELAY_MS, move || client.navigate(&dashboard))
                            .forget();
                    }
                    Err(e) => {
                        error!("Login failed: {e}");
                        toast.show(Toast::error(login_error_message(&e)));
                    }
                }
                finish_attempt(&in_flight);
                is_loading.set(false);
            });
        })
    };

    let on_login_click = on_login.reform(|_: MouseEvent| ());

    let on_keypress = {
        let on_login = on_login.clone();
        Callback::from(move |e: KeyboardEvent| {
            if is_submit_key(&e.key()) {
                e.prevent_default();
                on_login.emit(());
            }
        })
    };

    let on_signup = {
        let client = client.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(client) = (*client).as_ref() {
                client.navigate(&client.config().pages.signup);
            }
        })
    };

    let app_name = match (*client).as_ref() {
        Ok(client) => client.config().app_name.clone(),
        Err(_) => "TaskGrid".to_string(),
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 dark:bg-gray-900">
            <ToastView toast={toast.current()} />
            <div class="w-full max-w-sm bg-white dark:bg-gray-800 rounded-lg shadow p-6">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white mb-6 text-center">
                    {app_name}
                </h1>

                if let Err(message) = (*client).as_ref() {
                    <div class="mb-4 p-3 bg-red-50 dark:bg-red-900/30 text-red-700 dark:text-red-300 rounded text-sm">
                        {message.clone()}
                    </div>
                }

                <label for="loginUsername" class="block text-sm text-gray-700 dark:text-gray-300 mb-1">
                    {"Username or email"}
                </label>
                <input
                    id="loginUsername"
                    type="text"
                    autocomplete="username"
                    class="w-full mb-4 px-3 py-2 border rounded dark:bg-gray-700 dark:text-white"
                    value={(*username).clone()}
                    oninput={on_username_input}
                    onkeypress={on_keypress.clone()}
                />

                <label for="loginPassword" class="block text-sm text-gray-700 dark:text-gray-300 mb-1">
                    {"Password"}
                </label>
                <input
                    id="loginPassword"
                    type="password"
                    autocomplete="current-password"
                    class="w-full mb-6 px-3 py-2 border rounded dark:bg-gray-700 dark:text-white"
                    value={(*password).clone()}
                    oninput={on_password_input}
                    onkeypress={on_keypress}
                />

                <button
                    id="loginBtn"
                    onclick={on_login_click}
                    disabled={*is_loading}
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-400 text-white font-medium py-2 px-4 rounded mb-3"
                >
                    if *is_loading {
                        {"Signing in..."}
                    } else {
                        {"Log in"}
                    }
                </button>

                <button
                    id="signupBtn"
                    onclick={on_signup}
                    class="w-full border border-blue-600 text-blue-600 dark:text-blue-400 py-2 px-4 rounded"
                >
                    {"Create an account"}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ToastKind;

    fn decode_error() -> ClientError {
        serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into()
    }

    #[test]
    fn only_enter_submits() {
        assert!(is_submit_key("Enter"));
        assert!(!is_submit_key("Tab"));
        assert!(!is_submit_key("e"));
    }

    #[test]
    fn second_attempt_is_refused_until_the_first_finishes() {
        let in_flight = RefCell::new(false);
        assert!(begin_attempt(&in_flight));
        assert!(!begin_attempt(&in_flight));

        finish_attempt(&in_flight);
        assert!(begin_attempt(&in_flight));
    }

    #[test]
    fn server_rejection_is_shown_verbatim() {
        let error = ClientError::Unauthorized("Invalid username or password".into());
        assert_eq!(login_error_message(&error), "Invalid username or password");
    }

    #[test]
    fn other_failures_are_prefixed() {
        let error = ClientError::Api {
            status: 500,
            message: "Login failed: database offline".into(),
        };
        assert_eq!(
            login_error_message(&error),
            "Error during login: Login failed: database offline"
        );
    }

    #[test]
    fn health_toast_reflects_outcome() {
        let healthy = Ok(HealthStatus {
            status: "healthy".into(),
            message: None,
        });
        assert_eq!(health_toast(&healthy).kind, ToastKind::Success);

        let unhealthy = Err(ClientError::Api {
            status: 503,
            message: "HTTP 503".into(),
        });
        assert_eq!(health_toast(&unhealthy).kind, ToastKind::Warning);

        assert_eq!(health_toast(&Err(decode_error())).kind, ToastKind::Warning);
    }
}
