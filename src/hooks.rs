use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::RuntimeConfig;
use crate::judge::JudgeHandle;
use crate::login::AuthState;
use crate::navigation::NavigationHandle;

/// Current URL fragment, kept in sync with `history` while the caller is
/// mounted. The listener is released together with the component's hooks.
pub fn use_hash_route(history: NavigationHandle) -> Signal<String> {
    let hash = use_signal(|| history.current_hash());
    use_hook(move || {
        let mut hash = hash;
        let subscription = history.subscribe(Box::new(move |next: &str| {
            tracing::debug!("navigate: {next:?}");
            hash.set(next.to_string());
        }));
        Rc::new(subscription)
    });
    hash
}

pub fn use_judge_client() -> JudgeHandle {
    use_context::<JudgeHandle>()
}

/// User id for judge requests: the logged-in identity, else the configured one.
pub fn use_effective_user_id() -> String {
    let auth = use_context::<Signal<AuthState>>();
    let config = use_context::<RuntimeConfig>();
    auth().user_id.unwrap_or(config.user_id)
}
