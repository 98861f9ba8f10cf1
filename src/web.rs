//! Browser binding
//!
//! The page owns rendering; this module forwards keyboard events and animation
//! frame timestamps into the session and hands back JSON snapshots.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::clicker::{Clicker, Upgrade};
use crate::session::Session;
use crate::sim::GameEvent;
use crate::tuning::Tuning;
use crate::view::Snapshot;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Survival Arcade loaded");
}

struct Arcade {
    session: Session,
    clicker: Clicker,
    last_time: f64,
    events: Vec<GameEvent>,
}

impl Arcade {
    /// Run ticks for this frame; finished runs pay out into the clicker score
    fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            time - self.last_time
        } else {
            0.0
        };
        self.last_time = time;

        self.session.advance(dt);
        self.clicker.advance(dt);

        for event in self.session.drain_events() {
            if let GameEvent::GameOver { experience, .. } = event {
                self.clicker.deposit(experience.max(0.0).floor() as u64);
            }
            self.events.push(event);
        }
    }
}

/// Handle exported to the page
#[wasm_bindgen]
pub struct ArcadeHandle {
    inner: Rc<RefCell<Arcade>>,
}

#[wasm_bindgen]
impl ArcadeHandle {
    /// Create with optional tuning JSON; bad tuning falls back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<ArcadeHandle, JsValue> {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring tuning: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(tuning, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(ArcadeHandle {
            inner: Rc::new(RefCell::new(Arcade {
                session,
                clicker: Clicker::new(),
                last_time: 0.0,
                events: Vec::new(),
            })),
        })
    }

    /// Listen for WASD on the window
    pub fn attach_keyboard(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let inner = self.inner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                inner.borrow_mut().session.key_down(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let inner = self.inner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                inner.borrow_mut().session.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn start_survival(&self) {
        self.inner.borrow_mut().session.start();
    }

    pub fn reset_survival(&self) {
        self.inner.borrow_mut().session.reset();
    }

    pub fn set_autopilot(&self, enabled: bool) {
        self.inner.borrow_mut().session.set_autopilot(enabled);
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().session.is_running()
    }

    /// Call from requestAnimationFrame with its timestamp
    pub fn frame(&self, time: f64) {
        self.inner.borrow_mut().frame(time);
    }

    /// Current world as JSON, or None when idle
    pub fn snapshot(&self) -> Option<String> {
        let inner = self.inner.borrow();
        let world = inner.session.world()?;
        match Snapshot::of(world).to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("Snapshot failed: {}", e);
                None
            }
        }
    }

    /// Survival and clicker notifications since the last call, as JSON
    pub fn drain_events(&self) -> String {
        let mut inner = self.inner.borrow_mut();
        let survival = std::mem::take(&mut inner.events);
        let clicker = inner.clicker.drain_events();
        serde_json::json!({ "survival": survival, "clicker": clicker }).to_string()
    }

    pub fn click(&self) -> u64 {
        self.inner.borrow_mut().clicker.click()
    }

    /// Buy upgrade by index (0-3). Returns false if unaffordable or unknown.
    pub fn purchase(&self, index: usize) -> bool {
        let Some(upgrade) = Upgrade::ALL.get(index).copied() else {
            return false;
        };
        self.inner.borrow_mut().clicker.purchase(upgrade).is_ok()
    }

    pub fn clicker_state(&self) -> String {
        serde_json::to_string(&self.inner.borrow().clicker).unwrap_or_default()
    }
}
