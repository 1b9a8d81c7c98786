// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection reporting.
//!
//! [`ListenerRegistry`] is a cloneable handle: owners may add and remove
//! listeners from any thread. Delivery happens on the UI thread through
//! [`SelectionNotifier`], which snapshots the registry under its lock and then
//! calls listeners outside of it, in registration order.
//!
//! Two rules govern a dispatch that is already in flight:
//!
//! - listeners added during it are not called until the next one;
//! - listeners removed during it are skipped for the rest of it.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use understory_wheel::{ItemId, ListenerRegistry, Selection};
//!
//! let registry = ListenerRegistry::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let id = registry.add(move |s: Selection| sink.lock().unwrap().push(s.position));
//!
//! registry.broadcast(Selection { position: 3, item_id: ItemId(30) });
//! assert!(registry.remove(id));
//! registry.broadcast(Selection { position: 4, item_id: ItemId(40) });
//!
//! assert_eq!(*seen.lock().unwrap(), vec![3]);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smallvec::SmallVec;

use crate::host::{ItemId, ListHost};
use crate::snap::{SnapStrategy, SnapTracker};

/// The centered item reported to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Adapter position of the centered item.
    pub position: usize,
    /// Stable identity of the centered item, or [`ItemId::UNKNOWN`].
    pub item_id: ItemId,
}

/// Handle returned by [`ListenerRegistry::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = dyn Fn(Selection) + Send + Sync;

struct Entry {
    id: ListenerId,
    active: AtomicBool,
    callback: Box<Callback>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("active", &self.active.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Arc<Entry>>,
}

/// Ordered set of selection listeners, shareable across threads.
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // Poisoning only means a listener panicked; the entry list is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `listener` after all existing ones.
    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Selection) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push(Arc::new(Entry {
            id,
            active: AtomicBool::new(true),
            callback: Box::new(listener),
        }));
        id
    }

    /// Unregisters a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut registry = self.lock();
        let Some(index) = registry.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = registry.entries.remove(index);
        entry.active.store(false, Ordering::Release);
        true
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Delivers `selection` to every registered listener in registration order.
    ///
    /// Returns how many listeners were called.
    pub fn broadcast(&self, selection: Selection) -> usize {
        let snapshot: SmallVec<[Arc<Entry>; 4]> = self.lock().entries.iter().cloned().collect();
        let mut delivered = 0;
        for entry in snapshot {
            if !entry.active.load(Ordering::Acquire) {
                continue;
            }
            (entry.callback)(selection);
            delivered += 1;
        }
        tracing::trace!(
            position = selection.position,
            item_id = selection.item_id.0,
            delivered,
            "selection delivered"
        );
        delivered
    }
}

/// When [`SelectionNotifier`] dispatches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// On every scroll event, even if the centered item did not change.
    #[default]
    EveryScroll,
    /// Only when the centered item differs from the last resolved one.
    OnChange,
}

/// Reports the centered item to a [`ListenerRegistry`] on scroll.
#[derive(Debug, Default)]
pub struct SelectionNotifier {
    registry: ListenerRegistry,
    policy: DispatchPolicy,
    last: Option<usize>,
}

impl SelectionNotifier {
    /// Creates a notifier with an empty registry.
    #[must_use]
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            policy,
            last: None,
        }
    }

    /// The listener registry. Clone it to hand out to other threads.
    #[must_use]
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Current dispatch policy.
    #[must_use]
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Last centered position seen by [`notify`](Self::notify).
    #[must_use]
    pub const fn last_position(&self) -> Option<usize> {
        self.last
    }

    /// Resolves the centered item and, per policy, delivers it.
    ///
    /// Returns the selection if it was dispatched.
    pub fn notify<H, S>(&mut self, host: &H, snap: &SnapTracker<S>) -> Option<Selection>
    where
        H: ListHost + ?Sized,
        S: SnapStrategy,
    {
        let position = snap.centered_index(host)?;
        let previous = self.last.replace(position);
        if self.policy == DispatchPolicy::OnChange && previous == Some(position) {
            return None;
        }
        let item_id = host
            .source()
            .and_then(|source| source.item_id(position))
            .unwrap_or(ItemId::UNKNOWN);
        let selection = Selection { position, item_id };
        self.registry.broadcast(selection);
        Some(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotTrack;
    use crate::track::{Unsettled, UnsettledTrack};

    fn recorder(log: &Arc<Mutex<Vec<(u8, Selection)>>>, tag: u8) -> impl Fn(Selection) + use<> {
        let log = Arc::clone(log);
        move |s| log.lock().unwrap().push((tag, s))
    }

    fn centered_track(position: usize) -> SlotTrack {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        track.set_item_ids(|i| ItemId(100 + i as i64));
        track.set_scroll_offset(40.0 * position as f64);
        track
    }

    #[test]
    fn listeners_are_called_once_each_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = SelectionNotifier::default();
        notifier.registry().add(recorder(&log, 1));
        notifier.registry().add(recorder(&log, 2));
        let snap = SnapTracker::default();

        notifier.notify(&centered_track(2), &snap);
        log.lock().unwrap().clear();

        let sent = notifier.notify(&centered_track(3), &snap);
        let expected = Selection {
            position: 3,
            item_id: ItemId(103),
        };
        assert_eq!(sent, Some(expected));
        assert_eq!(*log.lock().unwrap(), vec![(1, expected), (2, expected)]);
    }

    #[test]
    fn every_scroll_policy_repeats_unchanged_selection() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = SelectionNotifier::new(DispatchPolicy::EveryScroll);
        notifier.registry().add(recorder(&log, 1));
        let snap = SnapTracker::default();
        let track = centered_track(4);
        notifier.notify(&track, &snap);
        notifier.notify(&track, &snap);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn on_change_policy_deduplicates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = SelectionNotifier::new(DispatchPolicy::OnChange);
        notifier.registry().add(recorder(&log, 1));
        let snap = SnapTracker::default();
        assert!(notifier.notify(&centered_track(4), &snap).is_some());
        assert!(notifier.notify(&centered_track(4), &snap).is_none());
        assert!(notifier.notify(&centered_track(5), &snap).is_some());
        assert_eq!(notifier.last_position(), Some(5));
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn missing_source_reports_unknown_id() {
        let mut track = SlotTrack::new(10, 40, 200);
        track.set_padding_symmetric(80);
        let mut notifier = SelectionNotifier::default();
        let sent = notifier.notify(&track, &SnapTracker::default());
        assert_eq!(sent.map(|s| s.item_id), Some(ItemId::UNKNOWN));
    }

    #[test]
    fn empty_wheel_notifies_nobody() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = SelectionNotifier::default();
        notifier.registry().add(recorder(&log, 1));
        let track = SlotTrack::new(0, 40, 200);
        assert_eq!(notifier.notify(&track, &SnapTracker::default()), None);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn removal_during_dispatch_skips_removed_listener() {
        let registry = ListenerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<ListenerId>>> = Arc::new(Mutex::new(None));

        let handle = registry.clone();
        let target = Arc::clone(&victim);
        let first = recorder(&log, 1);
        registry.add(move |s| {
            first(s);
            if let Some(id) = target.lock().unwrap().take() {
                assert!(handle.remove(id));
            }
        });
        let second = registry.add(recorder(&log, 2));
        *victim.lock().unwrap() = Some(second);

        let s = Selection {
            position: 0,
            item_id: ItemId(0),
        };
        assert_eq!(registry.broadcast(s), 1);
        assert_eq!(*log.lock().unwrap(), vec![(1, s)]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn addition_during_dispatch_waits_for_next_one() {
        let registry = ListenerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = registry.clone();
        let late = recorder(&log, 9);
        let pending = Mutex::new(Some(late));
        registry.add(move |_| {
            if let Some(listener) = pending.lock().unwrap().take() {
                handle.add(listener);
            }
        });

        let s = Selection {
            position: 1,
            item_id: ItemId(1),
        };
        assert_eq!(registry.broadcast(s), 1);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(registry.broadcast(s), 2);
        assert_eq!(*log.lock().unwrap(), vec![(9, s)]);
    }

    #[test]
    fn listeners_can_be_managed_from_other_threads() {
        let registry = ListenerRegistry::new();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let id = registry.add(|_| {});
                    registry.add(|_| {});
                    assert!(registry.remove(id));
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(registry.len(), 4);
        assert!(!registry.remove(ListenerId(u64::MAX)));
    }

    #[test]
    fn unresolvable_center_notifies_nobody() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = SelectionNotifier::new(DispatchPolicy::EveryScroll);
        notifier.registry().add(recorder(&log, 1));
        let snap = SnapTracker::default();
        for missing in [Unsettled::Positions, Unsettled::Bounds] {
            assert_eq!(notifier.notify(&UnsettledTrack::new(missing), &snap), None);
        }
        assert_eq!(notifier.last_position(), None);
        assert!(log.lock().unwrap().is_empty());
    }
}
