pub mod frame_loop;
pub mod listener;
pub mod overlay;
pub mod runner;
pub mod session;
pub mod surface;

pub use orrery_engine;
pub use frame_loop::FrameLoop;
pub use listener::Listener;
pub use overlay::OverlayView;
pub use runner::{resolve_config, GameRunner};
pub use session::{random_seed, replace_session, WebSession};
pub use surface::Surface;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the current `WebSession`
/// - `app_mount` / `app_unmount` / `app_is_mounted`
/// - game event accessors for the host page
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_app!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `orrery_engine::Game` with a `new()` constructor
/// - `$game_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_app {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static SESSION: RefCell<Option<$crate::WebSession<$game_type>>> = RefCell::new(None);
        }

        /// Mount the app inside the element with id `element_id`.
        /// `options_json` is an optional partial `GameConfig` object.
        #[wasm_bindgen]
        pub fn app_mount(element_id: &str, options_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let defaults = <$game_type as $crate::orrery_engine::Game>::config(&game);
            let config = $crate::resolve_config(defaults, $crate::random_seed(), options_json.as_deref());

            // The live session is only replaced once the new one is up.
            let session = $crate::WebSession::mount(element_id, game, config)?;
            let mounted = SESSION.with(|cell| {
                $crate::replace_session(cell, session, |mut previous| {
                    previous.unmount();
                    log::info!("{}: unmounted", $game_name);
                })
            });
            if mounted {
                log::info!("{}: mounted", $game_name);
            }
            Ok(())
        }

        /// Stop the frame loop and remove everything `app_mount` added.
        #[wasm_bindgen]
        pub fn app_unmount() {
            // Take the session out first so teardown runs without the borrow held.
            let session = SESSION.with(|cell| cell.borrow_mut().take());
            if let Some(mut session) = session {
                session.unmount();
                log::info!("{}: unmounted", $game_name);
            }
        }

        #[wasm_bindgen]
        pub fn app_is_mounted() -> bool {
            SESSION.with(|cell| cell.borrow().as_ref().is_some_and(|s| s.is_mounted()))
        }

        // ---- Game event accessors ----

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            SESSION.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(std::ptr::null(), |s| s.game_events_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            SESSION.with(|cell| cell.borrow().as_ref().map_or(0, |s| s.game_events_len()))
        }
    };
}
