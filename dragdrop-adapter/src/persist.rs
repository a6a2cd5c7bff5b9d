use alloc::string::String;

/// Where encoded state goes. Implementations wrap whatever the host has:
/// browser local storage, a file, a test buffer.
pub trait Persistence {
    /// Returns the previously saved payload, or `None` when nothing was
    /// saved yet (or the backend lost it).
    fn load(&mut self) -> Option<String>;
    fn save(&mut self, data: &str);
}

/// In-memory [`Persistence`], for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryPersistence {
    data: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&mut self) -> Option<String> {
        self.data.clone()
    }

    fn save(&mut self, data: &str) {
        self.data = Some(String::from(data));
    }
}

/// Collapses save bursts: rapid edits schedule one write, `delay_ms`
/// after the last edit.
#[derive(Clone, Copy, Debug)]
pub struct DebouncedSaver {
    delay_ms: u64,
    due_ms: Option<u64>,
}

impl DebouncedSaver {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            due_ms: None,
        }
    }

    /// Schedules (or reschedules) a save `delay_ms` from `now_ms`.
    pub fn mark_dirty(&mut self, now_ms: u64) {
        self.due_ms = Some(now_ms + self.delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// Returns `true` once the scheduled save falls due; the caller then
    /// performs the actual write.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Forces the pending save due immediately (e.g. on shutdown).
    pub fn flush(&mut self) -> bool {
        self.due_ms.take().is_some()
    }
}

/// Loads JSON-encoded state, falling back to the default on a missing or
/// malformed payload. A corrupt save never takes the host down; it costs
/// the saved data and nothing else.
#[cfg(feature = "serde")]
pub fn load_json<T>(persistence: &mut dyn Persistence) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(data) = persistence.load() else {
        return T::default();
    };
    match serde_json::from_str(&data) {
        Ok(state) => state,
        Err(_err) => {
            adwarn!(error = %_err, "discarding malformed saved state");
            T::default()
        }
    }
}

/// Saves JSON-encoded state. Serialization failures are logged and
/// swallowed for the same reason malformed loads are.
#[cfg(feature = "serde")]
pub fn save_json<T>(persistence: &mut dyn Persistence, state: &T)
where
    T: serde::Serialize,
{
    match serde_json::to_string(state) {
        Ok(data) => persistence.save(&data),
        Err(_err) => adwarn!(error = %_err, "failed to encode state"),
    }
}
