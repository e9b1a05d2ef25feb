use arcade_core::HighScoreStore;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::storage::{LocalStorage, Storage, errors::StorageError};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// High scores kept in the browser's local storage, one plain number per key.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalScores;

impl HighScoreStore for LocalScores {
    fn load_high_score(&self, key: &str) -> u32 {
        match LocalStorage::get::<u32>(key) {
            Ok(score) => score,
            Err(StorageError::KeyNotFound(_)) => 0,
            Err(err) => {
                log::error!("Could not read {} from local storage: {:?}", key, err);
                0
            }
        }
    }

    fn save_high_score(&mut self, key: &str, score: u32) {
        if let Err(err) = LocalStorage::set(key, score) {
            log::error!("Could not save {} to local storage: {:?}", key, err);
        }
    }
}

/// Listens for `keydown` on the window and emits whatever `map` makes of the key.
///
/// Mapped keys have their default action suppressed so arrows and space don't scroll the page.
pub(crate) fn keydown_listener<I: 'static>(
    map: fn(&str) -> Option<I>,
    callback: Callback<I>,
) -> EventListener {
    let window = gloo::utils::window();
    EventListener::new_with_options(
        &window,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            if let Some(intent) = map(&key) {
                log::trace!("key {:?}", key);
                event.prevent_default();
                callback.emit(intent);
            }
        },
    )
}

#[derive(Properties, PartialEq)]
pub(crate) struct ScoreLineProps {
    pub score: u32,
    pub high_score: u32,
}

#[function_component]
pub(crate) fn ScoreLine(props: &ScoreLineProps) -> Html {
    html! {
        <header class="scores">
            <span>{"Score: "}<b>{props.score}</b></span>
            <span>{"Best: "}<b>{props.high_score}</b></span>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct OverlayProps {
    pub text: AttrValue,
    pub action: AttrValue,
    pub onclick: Callback<MouseEvent>,
}

/// Dimmed layer over a board with a message and a single button.
#[function_component]
pub(crate) fn Overlay(props: &OverlayProps) -> Html {
    html! {
        <div class="overlay">
            <h2>{props.text.clone()}</h2>
            <button onclick={props.onclick.clone()}>{props.action.clone()}</button>
        </div>
    }
}
