use dioxus::prelude::*;
use thiserror::Error;

use crate::theme::Theme;

/// Known accounts. Plaintext on purpose: this stands in for a real login.
const CREDENTIALS: &[(&str, &str)] = &[("1101", "0000"), ("1102", "1225"), ("santa", "rudolph")];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("아이디 또는 비밀번호가 올바르지 않습니다.")]
    Mismatch,
    #[error("아이디와 비밀번호를 입력하세요.")]
    Empty,
}

pub fn authenticate(identifier: &str, secret: &str) -> Result<(), LoginError> {
    if identifier.is_empty() || secret.is_empty() {
        return Err(LoginError::Empty);
    }
    CREDENTIALS
        .iter()
        .any(|(known_id, known_secret)| *known_id == identifier && *known_secret == secret)
        .then_some(())
        .ok_or(LoginError::Mismatch)
}

/// Logged-in identity shared by the shell through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user_id: Option<String>,
}

impl AuthState {
    pub fn is_login(&self) -> bool {
        self.user_id.is_some()
    }

    /// State after submitting the form with the fields exactly as typed.
    pub fn sign_in(identifier: &str, secret: &str) -> Result<Self, LoginError> {
        authenticate(identifier, secret)?;
        Ok(Self {
            user_id: Some(identifier.to_string()),
        })
    }
}

#[component]
pub fn LoginPanel() -> Element {
    let mut auth = use_context::<Signal<AuthState>>();
    let theme = use_context::<Theme>();
    let mut identifier = use_signal(String::new);
    let mut secret = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);

    if let Some(user_id) = auth().user_id {
        return rsx! {
            div { class: "login-panel",
                p { class: "login-welcome", style: "color: {theme.success};", "{user_id}님, 크리스마스 코딩 파티에 오신 것을 환영합니다!" }
                button {
                    r#type: "button",
                    class: "login-button",
                    onclick: move |_| {
                        tracing::info!("logout");
                        auth.set(AuthState::default());
                        secret.set(String::new());
                    },
                    "로그아웃"
                }
            }
        };
    }

    rsx! {
        form {
            class: "login-panel",
            onsubmit: move |event| {
                event.prevent_default();
                let id = identifier();
                match AuthState::sign_in(&id, &secret()) {
                    Ok(state) => {
                        tracing::info!("login succeeded for {id}");
                        notice.set(None);
                        auth.set(state);
                    }
                    Err(err) => {
                        tracing::warn!("login failed for {id:?}: {err}");
                        let message = err.to_string();
                        alert(&message);
                        notice.set(Some(message));
                    }
                }
            },
            input {
                r#type: "text",
                class: "login-input",
                placeholder: "ID",
                autocomplete: "username",
                value: "{identifier}",
                oninput: move |event| identifier.set(event.value()),
            }
            input {
                r#type: "password",
                class: "login-input",
                placeholder: "PassWord",
                autocomplete: "current-password",
                value: "{secret}",
                oninput: move |event| secret.set(event.value()),
            }
            button { r#type: "submit", class: "login-button", "로그인" }
            if let Some(message) = notice() {
                p { class: "login-notice", style: "color: {theme.failure};", "{message}" }
            }
        }
    }
}

fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_pair_logs_in() {
        assert_eq!(authenticate("1101", "0000"), Ok(()));
        assert_eq!(authenticate("santa", "rudolph"), Ok(()));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert_eq!(authenticate("1101", "0001"), Err(LoginError::Mismatch));
        assert_eq!(authenticate("1102", "0000"), Err(LoginError::Mismatch));
        assert_eq!(authenticate("9999", "0000"), Err(LoginError::Mismatch));
    }

    #[test]
    fn comparison_is_exact() {
        assert_eq!(authenticate("1101 ", "0000"), Err(LoginError::Mismatch));
        assert_eq!(authenticate("SANTA", "rudolph"), Err(LoginError::Mismatch));
    }

    #[test]
    fn form_submission_keeps_padding() {
        assert_eq!(AuthState::sign_in("1101 ", "0000"), Err(LoginError::Mismatch));
        assert_eq!(AuthState::sign_in(" 1101", "0000"), Err(LoginError::Mismatch));
        assert_eq!(
            AuthState::sign_in("1101", "0000"),
            Ok(AuthState {
                user_id: Some("1101".to_string())
            })
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(authenticate("", "0000"), Err(LoginError::Empty));
        assert_eq!(authenticate("1101", ""), Err(LoginError::Empty));
    }

    #[test]
    fn default_state_is_logged_out() {
        assert!(!AuthState::default().is_login());
        assert!(AuthState { user_id: Some("1101".to_string()) }.is_login());
    }
}
