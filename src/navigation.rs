//! Hash-fragment navigation.
//!
//! The shell never touches `window` directly: it is handed a [`HashHistory`]
//! and keeps the returned [`HashSubscription`] alive for as long as it is
//! mounted. Dropping the subscription releases the listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type HashListener = Box<dyn FnMut(&str)>;

pub trait HashHistory {
    /// Current fragment including the leading `#`, or an empty string.
    fn current_hash(&self) -> String;

    /// Registers `listener` for fragment changes until the subscription drops.
    fn subscribe(&self, listener: HashListener) -> HashSubscription;

    fn navigate(&self, hash: &str);
}

/// Scoped listener registration.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct HashSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl HashSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for HashSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for HashSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Cheap, comparable handle so a history can be passed as a component prop.
#[derive(Clone)]
pub struct NavigationHandle(Rc<dyn HashHistory>);

impl NavigationHandle {
    pub fn new(history: impl HashHistory + 'static) -> Self {
        Self(Rc::new(history))
    }

    /// Browser history on wasm, an in-memory one everywhere else.
    pub fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(BrowserHistory)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(MemoryHistory::default())
        }
    }

    pub fn current_hash(&self) -> String {
        self.0.current_hash()
    }

    pub fn subscribe(&self, listener: HashListener) -> HashSubscription {
        self.0.subscribe(listener)
    }

    pub fn navigate(&self, hash: &str) {
        self.0.navigate(hash);
    }
}

impl PartialEq for NavigationHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Default)]
struct MemoryState {
    hash: String,
    next_id: u64,
    listeners: Vec<(u64, Rc<RefCell<HashListener>>)>,
}

/// In-memory history. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryHistory {
    pub fn with_hash(hash: &str) -> Self {
        let history = Self::default();
        history.state.borrow_mut().hash = hash.to_string();
        history
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl HashHistory for MemoryHistory {
    fn current_hash(&self) -> String {
        self.state.borrow().hash.clone()
    }

    fn subscribe(&self, listener: HashListener) -> HashSubscription {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.listeners.push((id, Rc::new(RefCell::new(listener))));
            id
        };
        let state = Rc::downgrade(&self.state);
        HashSubscription::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn navigate(&self, hash: &str) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.hash == hash {
                return;
            }
            state.hash = hash.to_string();
            state
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect::<Vec<_>>()
        };
        // Listeners run without the state borrowed so they may read the hash.
        for listener in listeners {
            (listener.borrow_mut())(hash);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
impl HashHistory for BrowserHistory {
    fn current_hash(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default()
    }

    fn subscribe(&self, mut listener: HashListener) -> HashSubscription {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            return HashSubscription::new(|| {});
        };
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let hash = web_sys::window()
                .and_then(|window| window.location().hash().ok())
                .unwrap_or_default();
            listener(&hash);
        }) as Box<dyn FnMut(_)>);
        if let Err(err) =
            window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("hashchange listener not attached: {err:?}");
        }
        HashSubscription::new(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "hashchange",
                    closure.as_ref().unchecked_ref(),
                );
            }
            tracing::debug!("hashchange listener released");
            drop(closure);
        })
    }

    fn navigate(&self, hash: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(hash);
        }
    }
}
