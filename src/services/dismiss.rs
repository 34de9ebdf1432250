//! Outside-click dismissal regions.

use std::collections::HashSet;

use crate::types::search::{PointerDown, RegionId};

/// Named regions that together make up one dismissable piece of UI.
#[derive(Debug, Clone, Default)]
pub struct DismissRegions {
    regions: HashSet<RegionId>,
}

impl DismissRegions {
    pub fn new(regions: &[RegionId]) -> Self {
        Self {
            regions: regions.iter().copied().collect(),
        }
    }

    pub fn register(&mut self, region: RegionId) {
        self.regions.insert(region);
    }

    pub fn unregister(&mut self, region: RegionId) {
        self.regions.remove(&region);
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.regions.contains(&region)
    }

    /// True when the pointer landed in none of the registered regions.
    ///
    /// With nothing registered there is nothing to be outside of, so this is false.
    pub fn is_outside(&self, event: &PointerDown) -> bool {
        !self.regions.is_empty() && !event.regions.iter().any(|r| self.regions.contains(r))
    }
}
