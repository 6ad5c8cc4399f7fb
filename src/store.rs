//! The observable, persisted color scheme preference.
//!
//! [`PreferenceStore`] owns a single [`ColorScheme`] cell. It reads the
//! initial value from an injected [`PreferenceBackend`], publishes every
//! change to its subscribers synchronously, and on [`PreferenceStore::toggle`]
//! writes the new value back to the backend and to an optional
//! [`PresentationSurface`].
//!
//! `set` deliberately leaves the backend and the surface alone so a host can
//! restore state without triggering a write-back. Callers that want an
//! explicit `set` to stick follow it with [`PreferenceStore::persist`].
//!
//! The store is single-threaded (`!Send`): every operation completes
//! synchronously on the caller's thread.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use colorscheme::{ColorScheme, MemoryBackend, PreferenceStore};
//!
//! let backend = Rc::new(RefCell::new(MemoryBackend::with_entry("color-scheme", "dark")));
//! let store = PreferenceStore::with_backend(Box::new(Rc::clone(&backend)));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let subscription = store.subscribe(move |scheme| sink.borrow_mut().push(scheme));
//!
//! assert_eq!(store.toggle(), ColorScheme::Light);
//! assert_eq!(backend.borrow().get("color-scheme"), Some("light"));
//! assert_eq!(*seen.borrow(), vec![ColorScheme::Dark, ColorScheme::Light]);
//!
//! subscription.unsubscribe();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::backend::PreferenceBackend;
use crate::config::{DEFAULT_SCHEME, SCHEME_ATTRIBUTE, STORAGE_KEY};
use crate::error::Result;
use crate::scheme::ColorScheme;
use crate::surface::PresentationSurface;

type Callback = Rc<RefCell<dyn FnMut(ColorScheme)>>;

/// Registered subscribers keyed by a monotonically increasing id, which
/// keeps iteration in insertion order.
#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback>,
}

impl Subscribers {
    fn insert(&mut self, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }
}

/// Where the initial value came from. Logged at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSource {
    /// A valid value was read from the backend.
    Stored,
    /// The backend had no (or an empty) entry.
    Missing,
    /// The backend held something other than `light`/`dark`.
    Normalized,
    /// No backend was attached.
    Detached,
}

/// Observable color scheme preference with injected persistence.
pub struct PreferenceStore {
    value: Cell<ColorScheme>,
    initial_source: InitialSource,
    subscribers: Rc<RefCell<Subscribers>>,
    /// Values waiting to be delivered; non-empty only while a round runs.
    pending: RefCell<VecDeque<ColorScheme>>,
    notifying: Cell<bool>,
    backend: RefCell<Option<Box<dyn PreferenceBackend>>>,
    surface: RefCell<Option<Box<dyn PresentationSurface>>>,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("value", &self.value.get())
            .field("initial_source", &self.initial_source)
            .field("subscribers", &self.subscriber_count())
            .field("has_backend", &self.backend.borrow().is_some())
            .field("has_surface", &self.surface.borrow().is_some())
            .finish()
    }
}

impl PreferenceStore {
    /// Creates a store, reading the initial value from `backend` if present.
    ///
    /// Never fails. A missing backend, a missing or empty entry, and an
    /// unrecognised entry all fall back to [`DEFAULT_SCHEME`].
    pub fn new(backend: Option<Box<dyn PreferenceBackend>>) -> Self {
        let (value, initial_source) = match backend.as_deref() {
            None => (DEFAULT_SCHEME, InitialSource::Detached),
            Some(backend) => read_initial(backend),
        };

        log::info!("color scheme starts as {value} ({initial_source:?})");

        Self {
            value: Cell::new(value),
            initial_source,
            subscribers: Rc::new(RefCell::new(Subscribers::default())),
            pending: RefCell::new(VecDeque::new()),
            notifying: Cell::new(false),
            backend: RefCell::new(backend),
            surface: RefCell::new(None),
        }
    }

    pub fn with_backend(backend: Box<dyn PreferenceBackend>) -> Self {
        Self::new(Some(backend))
    }

    /// A store with no persistent backend, as in a server-rendering context.
    pub fn detached() -> Self {
        Self::new(None)
    }

    /// Attaches the surface that `toggle` reflects the scheme onto.
    pub fn with_surface(self, surface: Box<dyn PresentationSurface>) -> Self {
        *self.surface.borrow_mut() = Some(surface);
        self
    }

    pub fn get(&self) -> ColorScheme {
        self.value.get()
    }

    pub fn initial_source(&self) -> InitialSource {
        self.initial_source
    }

    pub fn has_backend(&self) -> bool {
        self.backend.borrow().is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().callbacks.len()
    }

    /// Registers `callback` and immediately calls it with the current value.
    ///
    /// The callback is then called once per `set`/`toggle` until
    /// [`Subscription::unsubscribe`] is called. Dropping the returned handle
    /// does not unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(ColorScheme) + 'static,
    {
        let callback: Callback = Rc::new(RefCell::new(callback));
        let id = self.subscribers.borrow_mut().insert(Rc::clone(&callback));
        log::debug!("subscriber {id} registered");

        deliver(id, &callback, self.value.get());

        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Replaces the value and notifies subscribers.
    ///
    /// Subscribers are notified even if `value` equals the current value.
    /// Neither the backend nor the surface is touched.
    pub fn set(&self, value: ColorScheme) {
        self.value.set(value);
        self.notify(value);
    }

    /// Parses `value` and [`set`](Self::set)s it.
    ///
    /// Anything other than `light`/`dark` is rejected with
    /// [`PreferenceError::InvalidValue`](crate::PreferenceError::InvalidValue);
    /// the store and its subscribers are left untouched.
    pub fn set_str(&self, value: &str) -> Result<()> {
        let scheme = value.parse::<ColorScheme>()?;
        self.set(scheme);
        Ok(())
    }

    /// Flips the scheme, reflects the new value onto the surface, writes it
    /// to the backend, then notifies subscribers.
    ///
    /// The side effects land before any subscriber runs, so a subscriber that
    /// changes the store again always has the last word. Missing
    /// collaborators are skipped; the flip and the notification always
    /// happen. Returns the new value.
    pub fn toggle(&self) -> ColorScheme {
        let next = self.value.get().toggled();
        self.value.set(next);

        if let Some(surface) = self.surface.borrow_mut().as_mut() {
            surface.set_attribute(SCHEME_ATTRIBUTE, next.as_str());
        }
        self.write_backend(next);

        log::info!("color scheme toggled to {next}");
        self.notify(next);
        next
    }

    /// Writes the current value to the backend without notifying anyone.
    pub fn persist(&self) {
        self.write_backend(self.value.get());
    }

    fn write_backend(&self, value: ColorScheme) {
        match self.backend.borrow_mut().as_mut() {
            Some(backend) => backend.write(STORAGE_KEY, value.as_str()),
            None => log::debug!("no backend attached, {value} not persisted"),
        }
    }

    /// Queues `value` for delivery and drains the queue unless a round is
    /// already running further up the stack, in which case that round picks
    /// it up once the current value has reached every subscriber.
    fn notify(&self, value: ColorScheme) {
        self.pending.borrow_mut().push_back(value);
        if self.notifying.replace(true) {
            return;
        }

        loop {
            let Some(value) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            self.deliver_round(value);
        }
        self.notifying.set(false);
    }

    fn deliver_round(&self, value: ColorScheme) {
        // Snapshot so callbacks may subscribe/unsubscribe while we iterate.
        let snapshot: Vec<(u64, Callback)> = self
            .subscribers
            .borrow()
            .callbacks
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if !self.subscribers.borrow().callbacks.contains_key(&id) {
                continue;
            }
            deliver(id, &callback, value);
        }
    }
}

fn read_initial(backend: &dyn PreferenceBackend) -> (ColorScheme, InitialSource) {
    match backend.read(STORAGE_KEY) {
        Some(stored) if !stored.is_empty() => match stored.parse::<ColorScheme>() {
            Ok(scheme) => (scheme, InitialSource::Stored),
            Err(err) => {
                log::warn!("stored {STORAGE_KEY} is unusable, using {DEFAULT_SCHEME}: {err}");
                (DEFAULT_SCHEME, InitialSource::Normalized)
            }
        },
        _ => (DEFAULT_SCHEME, InitialSource::Missing),
    }
}

/// Calls one subscriber, containing panics.
fn deliver(id: u64, callback: &Callback, value: ColorScheme) {
    let Ok(mut callback) = callback.try_borrow_mut() else {
        // Rounds never nest; only a callback that changes the store from its
        // own initial delivery ends up here.
        log::debug!("subscriber {id} is already running, skipping {value}");
        return;
    };

    let result = catch_unwind(AssertUnwindSafe(|| (&mut *callback)(value)));
    if result.is_err() {
        log::error!("subscriber {id} panicked while handling {value}");
    }
}

/// Handle returned by [`PreferenceStore::subscribe`].
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    /// Stops further notifications. Calling it again has no effect.
    pub fn unsubscribe(&self) {
        let Some(subscribers) = self.subscribers.upgrade() else {
            return;
        };
        if subscribers.borrow_mut().callbacks.remove(&self.id).is_some() {
            log::debug!("subscriber {} removed", self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscribers
            .upgrade()
            .is_some_and(|subscribers| subscribers.borrow().callbacks.contains_key(&self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::PreferenceError;
    use crate::surface::RecordingSurface;

    fn recorder() -> (Rc<RefCell<Vec<ColorScheme>>>, impl FnMut(ColorScheme) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |scheme| sink.borrow_mut().push(scheme))
    }

    fn shared_backend(value: Option<&str>) -> Rc<RefCell<MemoryBackend>> {
        let backend = match value {
            Some(value) => MemoryBackend::with_entry(STORAGE_KEY, value),
            None => MemoryBackend::new(),
        };
        Rc::new(RefCell::new(backend))
    }

    #[test]
    fn test_detached_store_defaults_to_dark() {
        let store = PreferenceStore::detached();
        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(store.initial_source(), InitialSource::Detached);
        assert!(!store.has_backend());
    }

    #[test]
    fn test_empty_entry_falls_back() {
        let store = PreferenceStore::with_backend(Box::new(MemoryBackend::with_entry(STORAGE_KEY, "")));
        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(store.initial_source(), InitialSource::Missing);
    }

    #[test]
    fn test_unrecognised_entry_is_normalized_and_left_in_place() {
        let backend = shared_backend(Some("solarized"));
        let store = PreferenceStore::with_backend(Box::new(Rc::clone(&backend)));

        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(store.initial_source(), InitialSource::Normalized);
        assert_eq!(backend.borrow().get(STORAGE_KEY), Some("solarized"));
    }

    #[test]
    fn test_set_str_rejects_without_notifying() {
        let store = PreferenceStore::detached();
        let (seen, callback) = recorder();
        let _subscription = store.subscribe(callback);

        let err = store.set_str("blue").unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidValue(ref v) if v == "blue"));
        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark]);

        store.set_str("light").unwrap();
        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark, ColorScheme::Light]);
    }

    #[test]
    fn test_toggle_without_collaborators_still_flips_and_notifies() {
        let store = PreferenceStore::detached();
        let (seen, callback) = recorder();
        let _subscription = store.subscribe(callback);

        assert_eq!(store.toggle(), ColorScheme::Light);
        assert_eq!(store.get(), ColorScheme::Light);
        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark, ColorScheme::Light]);
    }

    #[test]
    fn test_toggle_writes_surface_and_backend() {
        let backend = shared_backend(None);
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        let store = PreferenceStore::with_backend(Box::new(Rc::clone(&backend)))
            .with_surface(Box::new(Rc::clone(&surface)));

        store.toggle();

        assert_eq!(backend.borrow().get(STORAGE_KEY), Some("light"));
        assert_eq!(surface.borrow().attribute(SCHEME_ATTRIBUTE), Some("light"));
    }

    #[test]
    fn test_persist_writes_current_value_only() {
        let backend = shared_backend(Some("dark"));
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        let store = PreferenceStore::with_backend(Box::new(Rc::clone(&backend)))
            .with_surface(Box::new(Rc::clone(&surface)));
        let (seen, callback) = recorder();
        let _subscription = store.subscribe(callback);

        store.set(ColorScheme::Light);
        assert_eq!(backend.borrow().get(STORAGE_KEY), Some("dark"));

        store.persist();
        assert_eq!(backend.borrow().get(STORAGE_KEY), Some("light"));
        assert_eq!(surface.borrow().assignments(), 0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = PreferenceStore::detached();
        let (seen, callback) = recorder();
        let subscription = store.subscribe(callback);
        let _other = store.subscribe(|_| {});

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert_eq!(store.subscriber_count(), 1);

        store.toggle();
        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark]);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let store = PreferenceStore::detached();
        let subscription = store.subscribe(|_| {});
        drop(store);

        subscription.unsubscribe();
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_dropping_handle_keeps_subscription() {
        let store = PreferenceStore::detached();
        let (seen, callback) = recorder();
        drop(store.subscribe(callback));

        store.set(ColorScheme::Light);
        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark, ColorScheme::Light]);
    }

    #[test]
    fn test_panicking_subscriber_does_not_stop_delivery() {
        let store = PreferenceStore::detached();
        let _bad = store.subscribe(|scheme| {
            if scheme == ColorScheme::Light {
                panic!("subscriber failure");
            }
        });
        let (seen, callback) = recorder();
        let _good = store.subscribe(callback);

        store.toggle();
        store.toggle();

        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(
            *seen.borrow(),
            vec![ColorScheme::Dark, ColorScheme::Light, ColorScheme::Dark]
        );
    }

    #[test]
    fn test_nested_set_is_delivered_after_current_round() {
        let store = Rc::new(PreferenceStore::detached());
        let calls = Rc::new(Cell::new(0));

        // Forces the scheme back to dark whenever it turns light.
        let weak = Rc::downgrade(&store);
        let counter = Rc::clone(&calls);
        let _guard = store.subscribe(move |scheme| {
            counter.set(counter.get() + 1);
            if scheme == ColorScheme::Light {
                if let Some(store) = weak.upgrade() {
                    store.set(ColorScheme::Dark);
                }
            }
        });
        let (seen, callback) = recorder();
        let _observer = store.subscribe(callback);

        store.set(ColorScheme::Light);

        assert_eq!(store.get(), ColorScheme::Dark);
        // Initial delivery, the outer light, then the queued dark.
        assert_eq!(calls.get(), 3);
        assert_eq!(
            *seen.borrow(),
            vec![ColorScheme::Dark, ColorScheme::Light, ColorScheme::Dark]
        );
        assert_eq!(seen.borrow().last().copied(), Some(store.get()));
    }

    #[test]
    fn test_nested_toggle_keeps_backend_surface_and_subscribers_in_step() {
        let backend = shared_backend(Some("dark"));
        let surface = Rc::new(RefCell::new(RecordingSurface::new()));
        let store = Rc::new(
            PreferenceStore::with_backend(Box::new(Rc::clone(&backend)))
                .with_surface(Box::new(Rc::clone(&surface))),
        );

        // Flips straight back whenever the scheme turns light.
        let weak = Rc::downgrade(&store);
        let _bouncer = store.subscribe(move |scheme| {
            if scheme == ColorScheme::Light {
                if let Some(store) = weak.upgrade() {
                    store.toggle();
                }
            }
        });
        let (seen, callback) = recorder();
        let _observer = store.subscribe(callback);

        store.toggle();

        assert_eq!(store.get(), ColorScheme::Dark);
        assert_eq!(backend.borrow().get(STORAGE_KEY), Some("dark"));
        assert_eq!(surface.borrow().attribute(SCHEME_ATTRIBUTE), Some("dark"));
        assert_eq!(backend.borrow().write_count(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![ColorScheme::Dark, ColorScheme::Light, ColorScheme::Dark]
        );
        assert_eq!(seen.borrow().last().copied(), Some(store.get()));
    }

    #[test]
    fn test_unsubscribe_from_another_callback_takes_effect_immediately() {
        let store = PreferenceStore::detached();
        let victim_handle: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let handle = Rc::clone(&victim_handle);
        let _killer = store.subscribe(move |scheme| {
            if scheme == ColorScheme::Light {
                if let Some(subscription) = handle.borrow().as_ref() {
                    subscription.unsubscribe();
                }
            }
        });
        let (seen, callback) = recorder();
        *victim_handle.borrow_mut() = Some(store.subscribe(callback));

        store.toggle();

        assert_eq!(*seen.borrow(), vec![ColorScheme::Dark]);
    }

    #[test]
    fn test_subscribe_during_notification_starts_with_current_value() {
        let store = Rc::new(PreferenceStore::detached());
        let late_seen = Rc::new(RefCell::new(Vec::new()));
        let late_handles = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&store);
        let sink = Rc::clone(&late_seen);
        let handles = Rc::clone(&late_handles);
        let _spawner = store.subscribe(move |scheme| {
            if scheme != ColorScheme::Light {
                return;
            }
            if let Some(store) = weak.upgrade() {
                let sink = Rc::clone(&sink);
                let subscription = store.subscribe(move |s| sink.borrow_mut().push(s));
                handles.borrow_mut().push(subscription);
            }
        });

        store.set(ColorScheme::Light);
        assert_eq!(*late_seen.borrow(), vec![ColorScheme::Light]);

        store.set(ColorScheme::Dark);
        assert_eq!(*late_seen.borrow(), vec![ColorScheme::Light, ColorScheme::Dark]);
    }
}
