use js_sys::{Array, Reflect};
use not_today_engine::Haptics;
use wasm_bindgen::JsValue;

/// `navigator.vibrate`. Rejected calls are ignored.
pub struct NavigatorHaptics {
    navigator: web_sys::Navigator,
}

impl NavigatorHaptics {
    /// `None` when the browser has no vibration API.
    pub fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        let supported = Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
        if !supported {
            log::info!("vibration not supported");
            return None;
        }
        Some(Self { navigator })
    }
}

impl Haptics for NavigatorHaptics {
    fn vibrate(&mut self, pattern: &[u32]) {
        let steps: Array = pattern.iter().map(|ms| JsValue::from(*ms)).collect();
        if !self.navigator.vibrate_with_pattern(&steps) {
            log::trace!("vibrate rejected");
        }
    }

    fn stop(&mut self) {
        self.navigator.vibrate_with_duration(0);
    }
}
