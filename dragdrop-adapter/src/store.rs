use alloc::sync::Arc;

/// A minimal reducer-style state container.
///
/// State is replaced, never mutated in place: `dispatch` runs the pure
/// reducer against the current state and swaps in the result. Hosts that
/// render from `state()` therefore never observe a half-applied action,
/// and change notification is a single callback after the swap.
#[derive(Clone)]
pub struct Store<S, A> {
    state: S,
    reducer: Arc<dyn Fn(&S, &A) -> S + Send + Sync>,
    on_change: Option<Arc<dyn Fn(&S) + Send + Sync>>,
    dirty: bool,
}

impl<S: core::fmt::Debug, A> core::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl<S, A> Store<S, A> {
    pub fn new(initial: S, reducer: impl Fn(&S, &A) -> S + Send + Sync + 'static) -> Self {
        Self {
            state: initial,
            reducer: Arc::new(reducer),
            on_change: None,
            dirty: false,
        }
    }

    /// Registers a callback invoked after every dispatch, with the new
    /// state.
    pub fn with_on_change(mut self, on_change: impl Fn(&S) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn dispatch(&mut self, action: &A) {
        self.state = (self.reducer)(&self.state, action);
        self.dirty = true;
        if let Some(on_change) = &self.on_change {
            on_change(&self.state);
        }
    }

    /// Replaces the state without running the reducer (e.g. after loading
    /// from persistence). Does not mark the store dirty or notify.
    pub fn replace(&mut self, state: S) {
        self.state = state;
        self.dirty = false;
    }

    /// Whether any action was dispatched since the last [`Store::take_dirty`]
    /// or [`Store::replace`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears and returns the dirty flag; pairs with a debounced saver.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}
