use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::Interval;
use hanbunko_core::TickScheduler;
use serde::Serialize;
use serde::de::DeserializeOwned;
use yew::prelude::*;

/// Namespaced local-storage key for one stored value type.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {:?} to local storage: {:?}", T::KEY, err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

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

/// Session countdown source backed by a browser interval. Each handle is a
/// live one-second interval that stops with its drop.
pub(crate) struct IntervalTicker {
    tick: Callback<()>,
}

impl IntervalTicker {
    pub(crate) const PERIOD_MS: u32 = 1_000;

    pub(crate) fn new(tick: Callback<()>) -> Self {
        Self { tick }
    }
}

impl TickScheduler for IntervalTicker {
    type Handle = Interval;

    fn schedule(&mut self) -> Interval {
        let tick = self.tick.clone();
        Interval::new(Self::PERIOD_MS, move || tick.emit(()))
    }
}

/// Countdown source for sessions that never arm the round clock, like versus
/// grids where the only clock is the turn timer outside the engine.
pub(crate) struct IdleTicker;

impl TickScheduler for IdleTicker {
    type Handle = ();

    fn schedule(&mut self) {
        log::warn!("round clock armed on a session without a live ticker");
    }
}
