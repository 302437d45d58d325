//! One-shot observer for the next transient UI surface to gain focus.
//!
//! Hosts do not hand out the surface of a quick-select list when they open
//! it. The switcher arms the registry right before asking for the list, and
//! the host forwards every activation here; the first widget activation
//! after arming is the list.

use parking_lot::Mutex;

use crate::host::SurfaceInfo;

type Callback = Box<dyn FnOnce(SurfaceInfo) + Send>;

#[derive(Default)]
struct ListenerState {
    listening: bool,
    callback: Option<Callback>,
}

/// Tracks whether the next widget activation should be reported.
///
/// Constructed once per host session and shared (usually through `Arc`)
/// between the host integration and the [`SwitcherController`](crate::SwitcherController).
#[derive(Default)]
pub struct ViewRegistry {
    state: Mutex<ListenerState>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the registry. A callback stored by an earlier call is replaced.
    pub fn start_listening(&self, callback: impl FnOnce(SurfaceInfo) + Send + 'static) {
        let mut state = self.state.lock();
        if state.listening {
            log::debug!("Replacing pending surface listener");
        }
        state.listening = true;
        state.callback = Some(Box::new(callback));
    }

    /// Disarm without invoking the pending callback.
    pub fn stop_listening(&self) {
        let mut state = self.state.lock();
        state.listening = false;
        state.callback = None;
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state.lock().listening
    }

    /// Host hook, called whenever any surface gains focus.
    ///
    /// Returns `true` when the activation was consumed by a pending listener.
    pub fn on_activated(&self, surface: SurfaceInfo) -> bool {
        let callback = {
            let mut state = self.state.lock();
            if !state.listening || !surface.is_widget {
                return false;
            }
            state.listening = false;
            state.callback.take()
        };

        // Invoked outside the lock so the callback may re-arm the registry.
        match callback {
            Some(callback) => {
                callback(surface);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ViewRegistry")
            .field("listening", &state.listening)
            .finish_non_exhaustive()
    }
}
