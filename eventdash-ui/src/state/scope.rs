//! Page scope
//!
//! Tracks whether the owning component is still mounted so that a response
//! arriving after unmount is dropped instead of written into disposed
//! signals.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone)]
pub struct PageScope {
    alive: Rc<Cell<bool>>,
}

impl PageScope {
    /// Create a scope bound to the current reactive owner
    pub fn new() -> Self {
        let alive = Rc::new(Cell::new(true));
        let flag = Rc::clone(&alive);
        on_cleanup(move || flag.set(false));
        Self { alive }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Spawn `work` and hand its output to `apply` only while mounted
    pub fn spawn<T: 'static>(
        &self,
        work: impl std::future::Future<Output = T> + 'static,
        apply: impl FnOnce(T) + 'static,
    ) {
        let scope = self.clone();
        spawn_local(async move {
            let output = work.await;
            if scope.is_alive() {
                apply(output);
            }
        });
    }
}
