//! Rival flavor text for the game-over screen
//!
//! The lines are a fixed deck; the short delivery delay stands in for a
//! remote lookup so the modal can fade the text in. Delivery is guarded by a
//! liveness flag: a line arriving after the modal is gone is dropped.

/// Simulated lookup latency in milliseconds
pub const TAUNT_DELAY_MS: i32 = 600;

/// Shown while the "lookup" is in flight
pub const TAUNT_PLACEHOLDER: &str = "Composing gloat...";

const TAUNTS: &[&str] = &[
    "So... how DO you keep looking that bright? Asking for a friend.",
    "We're not bitter. We're professionally impressed. Fine - slightly bitter.",
    "Somebody tell them we also want the secret recipe for perfect light.",
    "We don't keep their photometric charts as screensavers. Our designers do.",
];

/// Line reserved for runs that ended with nothing on the board
const TAUNT_SHUTOUT: &str = "Zero lumens. Even our budget range beats that.";

/// Pick a line for a finished run. `roll` is a uniform sample in [0, 1) so
/// the choice stays testable.
pub fn pick_taunt(final_score: u32, roll: f64) -> &'static str {
    if final_score == 0 {
        return TAUNT_SHUTOUT;
    }
    let idx = ((roll * TAUNTS.len() as f64) as usize).min(TAUNTS.len() - 1);
    TAUNTS[idx]
}

/// Resolve a taunt after the fixed delay and hand it to `deliver`, unless the
/// originating view was torn down in the meantime (WASM only).
#[cfg(target_arch = "wasm32")]
pub fn request_taunt(
    final_score: u32,
    alive: std::rc::Rc<std::cell::Cell<bool>>,
    deliver: impl FnOnce(&'static str) + 'static,
) {
    wasm_bindgen_futures::spawn_local(async move {
        sleep_ms(TAUNT_DELAY_MS).await;
        if !alive.get() {
            log::info!("Taunt arrived after the modal closed, dropping it");
            return;
        }
        deliver(pick_taunt(final_score, js_sys::Math::random()));
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let window = web_sys::window().expect("no window");
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
