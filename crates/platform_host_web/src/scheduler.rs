//! Browser timer adapter backed by `window.setInterval` and `window.setTimeout`.

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use platform_host::{IntervalCallback, Scheduler, TimeoutCallback, TimerHandle, TimerKind};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct BrowserTimer {
    js_id: i32,
    kind: TimerKind,
    #[cfg(target_arch = "wasm32")]
    _closure: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct TimerTable {
    next_id: u64,
    live: HashMap<u64, BrowserTimer>,
    // Closures stay alive here until no callback is on the stack; dropping a wasm closure while
    // it runs is invalid.
    retired: Vec<BrowserTimer>,
    firing_depth: u32,
}

impl Drop for TimerTable {
    fn drop(&mut self) {
        // A JS timer must never outlive the closure it calls.
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            for timer in self.live.values() {
                match timer.kind {
                    TimerKind::Interval => window.clear_interval_with_handle(timer.js_id),
                    TimerKind::Timeout => window.clear_timeout_with_handle(timer.js_id),
                }
            }
        }
    }
}

#[derive(Clone, Default)]
/// Browser scheduler that owns the JS closures of every live timer.
///
/// On targets other than `wasm32` every start call fails, so callers fall back to manual-only
/// behavior.
pub struct WebScheduler {
    table: Rc<RefCell<TimerTable>>,
}

impl fmt::Debug for WebScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("WebScheduler")
            .field("live", &table.live.len())
            .field("retired", &table.retired.len())
            .finish()
    }
}

#[cfg(target_arch = "wasm32")]
fn run_guarded(table: &Weak<RefCell<TimerTable>>, callback: impl FnOnce()) {
    if let Some(table) = table.upgrade() {
        table.borrow_mut().firing_depth += 1;
    }
    callback();
    if let Some(table) = table.upgrade() {
        let mut table = table.borrow_mut();
        table.firing_depth = table.firing_depth.saturating_sub(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn js_delay(ms: u64) -> i32 {
    ms.min(i32::MAX as u64) as i32
}

impl WebScheduler {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn next_handle(&self, kind: TimerKind) -> TimerHandle {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        TimerHandle {
            id: table.next_id,
            kind,
        }
    }

    fn release_retired(&self) {
        let mut table = self.table.borrow_mut();
        if table.firing_depth == 0 {
            table.retired.clear();
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn weak_table(&self) -> Weak<RefCell<TimerTable>> {
        Rc::downgrade(&self.table)
    }
}

impl Scheduler for WebScheduler {
    fn start_interval(
        &self,
        period_ms: u64,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, String> {
        if period_ms == 0 {
            return Err("interval period must be positive".to_string());
        }

        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "browser window unavailable".to_string())?;
            self.release_retired();
            let handle = self.next_handle(TimerKind::Interval);
            let table = self.weak_table();
            let mut callback = callback;
            let closure = Closure::<dyn FnMut()>::new(move || run_guarded(&table, || callback()));
            let js_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    js_delay(period_ms),
                )
                .map_err(|err: JsValue| format!("setInterval failed: {err:?}"))?;
            self.table.borrow_mut().live.insert(
                handle.id,
                BrowserTimer {
                    js_id,
                    kind: handle.kind,
                    _closure: closure,
                },
            );
            Ok(handle)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = callback;
            self.release_retired();
            Err("browser timers are unavailable on this target".to_string())
        }
    }

    fn start_timeout(
        &self,
        delay_ms: u64,
        callback: TimeoutCallback,
    ) -> Result<TimerHandle, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "browser window unavailable".to_string())?;
            self.release_retired();
            let handle = self.next_handle(TimerKind::Timeout);
            let table = self.weak_table();
            let mut pending = Some(callback);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let Some(callback) = pending.take() else {
                    return;
                };
                run_guarded(&table, callback);
                if let Some(table) = table.upgrade() {
                    let mut table = table.borrow_mut();
                    if let Some(timer) = table.live.remove(&handle.id) {
                        table.retired.push(timer);
                    }
                }
            });
            let js_id = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    js_delay(delay_ms),
                )
                .map_err(|err: JsValue| format!("setTimeout failed: {err:?}"))?;
            self.table.borrow_mut().live.insert(
                handle.id,
                BrowserTimer {
                    js_id,
                    kind: handle.kind,
                    _closure: closure,
                },
            );
            Ok(handle)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, callback);
            self.release_retired();
            Err("browser timers are unavailable on this target".to_string())
        }
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut table = self.table.borrow_mut();
        let Some(timer) = table.live.remove(&handle.id) else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            match timer.kind {
                TimerKind::Interval => window.clear_interval_with_handle(timer.js_id),
                TimerKind::Timeout => window.clear_timeout_with_handle(timer.js_id),
            }
        }

        table.retired.push(timer);
    }

    fn active_timer_count(&self) -> usize {
        self.table.borrow().live.len()
    }
}
