use tokio::sync::watch;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// The single observable value a screen renders.
///
/// At steady state exactly one of `is_loading`, non-empty `data`, or `error`
/// is the active signal; transitions replace the whole value at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub is_loading: bool,
    pub data: T,
    pub error: Option<String>,
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            data: T::default(),
            error: None,
        }
    }
}

impl<T: Default> ViewState<T> {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            data: T::default(),
            error: None,
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            is_loading: false,
            data,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            data: T::default(),
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// State cell
// ---------------------------------------------------------------------------

/// A single-writer observable cell backed by a watch channel.
///
/// Writes replace the whole value, so a reader never observes a torn mix of
/// old and new fields. The owning pipeline (and the tasks it spawns) is the
/// only writer; any number of readers may `get` or `subscribe`.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Replace the current value.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Hand out a receiver that observes every subsequent replacement.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
