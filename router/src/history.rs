use crate::location::{LocationChange, Url};
use or_poisoned::OrPoisoned;
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        RwLock,
    },
};

/// A callback invoked with the new location after every history change.
pub type HistoryListener = Box<dyn Fn(&Url) + Send + Sync>;

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// The abstract history this router is driven by: an ordered sequence of
/// locations with push/replace/go operations and change notification.
///
/// The browser-backed implementation lives with the host framework; the
/// router core only ships [`MemoryHistory`].
pub trait History {
    /// The location currently at the top of the stack.
    fn current(&self) -> Url;

    /// Applies a navigation, pushing or replacing per
    /// [`LocationChange::replace`].
    fn navigate(&self, change: &LocationChange)
        -> Result<(), url::ParseError>;

    /// Moves within the stack by `delta` entries, clamped to its bounds.
    fn go(&self, delta: isize);

    /// Registers a change listener.
    fn listen(&self, listener: HistoryListener) -> ListenerId;

    /// Removes a previously registered listener.
    fn unlisten(&self, id: ListenerId);

    /// Pushes a new location onto the stack.
    fn push(&self, to: &str) -> Result<(), url::ParseError> {
        self.navigate(&LocationChange {
            value: to.to_string(),
            replace: false,
            ..Default::default()
        })
    }

    /// Replaces the current location.
    fn replace(&self, to: &str) -> Result<(), url::ParseError> {
        self.navigate(&LocationChange {
            value: to.to_string(),
            replace: true,
            ..Default::default()
        })
    }

    fn back(&self) {
        self.go(-1);
    }

    fn forward(&self) {
        self.go(1);
    }
}

/// An in-memory history: the stack lives entirely in the process.
///
/// This is the implementation tests and server-side rendering use; nothing
/// in it touches a browser.
#[derive(Default)]
pub struct MemoryHistory {
    inner: RwLock<Entries>,
    listeners: RwLock<Vec<(ListenerId, HistoryListener)>>,
    next_listener_id: AtomicUsize,
}

struct Entries {
    entries: Vec<Url>,
    index: usize,
}

impl Default for Entries {
    fn default() -> Self {
        let mut root = Url::default();
        *root.path_mut() = "/".to_string();
        Self {
            entries: vec![root],
            index: 0,
        }
    }
}

impl MemoryHistory {
    /// A history containing only the root location.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history seeded with the given entries, current at the last one.
    pub fn with_entries<I, S>(entries: I) -> Result<Self, url::ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| Url::parse(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if entries.is_empty() {
            return Ok(Self::new());
        }
        let index = entries.len() - 1;
        Ok(Self {
            inner: RwLock::new(Entries { entries, index }),
            ..Default::default()
        })
    }

    fn notify(&self) {
        let current = self.current();
        for (_, listener) in self.listeners.read().or_poisoned().iter() {
            listener(&current);
        }
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().or_poisoned();
        f.debug_struct("MemoryHistory")
            .field("entries", &inner.entries)
            .field("index", &inner.index)
            .finish_non_exhaustive()
    }
}

impl History for MemoryHistory {
    fn current(&self) -> Url {
        let inner = self.inner.read().or_poisoned();
        inner.entries.get(inner.index).cloned().unwrap_or_default()
    }

    fn navigate(
        &self,
        change: &LocationChange,
    ) -> Result<(), url::ParseError> {
        let url = Url::parse(&change.value)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            to = %change.value,
            replace = change.replace,
            "navigating"
        );
        {
            let mut inner = self.inner.write().or_poisoned();
            if change.replace {
                let index = inner.index;
                inner.entries[index] = url;
            } else {
                let index = inner.index;
                inner.entries.truncate(index + 1);
                inner.entries.push(url);
                inner.index += 1;
            }
        }
        self.notify();
        Ok(())
    }

    fn go(&self, delta: isize) {
        let changed = {
            let mut inner = self.inner.write().or_poisoned();
            let last = inner.entries.len() as isize - 1;
            let target = (inner.index as isize + delta).clamp(0, last);
            let changed = target as usize != inner.index;
            inner.index = target as usize;
            changed
        };
        if changed {
            self.notify();
        }
    }

    fn listen(&self, listener: HistoryListener) -> ListenerId {
        let id =
            ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().or_poisoned().push((id, listener));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners
            .write()
            .or_poisoned()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}
