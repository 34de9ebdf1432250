/// Typed key for a persisted scalar preference, carrying its default.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceKey<T> {
    name: String,
    default: T,
}

impl<T: Clone> PreferenceKey<T> {
    pub fn new(name: impl Into<String>, default: T) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> T {
        self.default.clone()
    }
}

/// The simple mode flag: restricts navigation to home and search when true.
pub fn simple_mode_key(name: &str) -> PreferenceKey<bool> {
    PreferenceKey::new(name, false)
}

/// A preference as seen by a component.
///
/// `Uninitialized` until the first client-side activation has completed; after that
/// either the stored value or the key's default.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceState<T> {
    Uninitialized,
    Default(T),
    Loaded(T),
}

impl<T: Clone> PreferenceState<T> {
    pub fn is_ready(&self) -> bool {
        !matches!(self, PreferenceState::Uninitialized)
    }

    /// The resolved value, or `None` while uninitialized.
    pub fn value(&self) -> Option<T> {
        match self {
            PreferenceState::Uninitialized => None,
            PreferenceState::Default(v) | PreferenceState::Loaded(v) => Some(v.clone()),
        }
    }

    /// The resolved value, falling back to `fallback` while uninitialized.
    pub fn value_or(&self, fallback: T) -> T {
        self.value().unwrap_or(fallback)
    }
}

impl<T> Default for PreferenceState<T> {
    fn default() -> Self {
        PreferenceState::Uninitialized
    }
}
