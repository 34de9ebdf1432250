/// Transient UI state of one mounted search box.
///
/// `suggestions_visible` and `history_visible` are never both true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchUiState {
    pub suggestions_visible: bool,
    pub history_visible: bool,
    pub search_text: String,
    /// Selected source identifiers in selection order; empty means all sources.
    pub selected_sources: Vec<String>,
}

/// Identity of a screen region that can be registered for outside-click dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    SearchInput,
    HistoryTrigger,
    HistoryPopup,
    SuggestionPopup,
}

/// A pointer-down event, described by the chain of registered regions containing
/// its target (innermost first). An empty chain means the target is in no region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerDown {
    pub regions: Vec<RegionId>,
}

impl PointerDown {
    pub fn inside(regions: &[RegionId]) -> Self {
        Self {
            regions: regions.to_vec(),
        }
    }

    pub fn outside() -> Self {
        Self::default()
    }
}

/// A click on a row inside a popup. Handlers may stop it from reaching the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowClick {
    propagation_stopped: bool,
}

impl RowClick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
