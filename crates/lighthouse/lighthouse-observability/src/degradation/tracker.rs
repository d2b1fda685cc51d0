//! Degradation episodes per component.
//!
//! A component is degraded from its first reported event until it is marked
//! recovered. Events reported while an episode is open fold into it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

/// A component fell back to a weaker mode of operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    /// e.g. `"sampler"` for units that exhausted a partition.
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEpisode {
    pub component: String,
    pub started_at: DateTime<Utc>,
    /// Most recent event of the episode.
    pub latest: DegradationEvent,
    pub occurrences: u32,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl DegradationEpisode {
    pub fn is_active(&self) -> bool {
        self.recovered_at.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    episodes: Vec<DegradationEpisode>,
    /// Component → index of its open episode.
    open: BTreeMap<String, usize>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        if let Some(episode) = self
            .open
            .get(&event.component)
            .and_then(|&i| self.episodes.get_mut(i))
        {
            episode.occurrences += 1;
            episode.latest = event;
            return;
        }
        self.open.insert(event.component.clone(), self.episodes.len());
        self.episodes.push(DegradationEpisode {
            component: event.component.clone(),
            started_at: event.timestamp,
            latest: event,
            occurrences: 1,
            recovered_at: None,
        });
    }

    /// Close the component's open episode. Returns false if it had none.
    pub fn mark_recovered(&mut self, component: &str) -> bool {
        let Some(index) = self.open.remove(component) else {
            return false;
        };
        if let Some(episode) = self.episodes.get_mut(index) {
            episode.recovered_at = Some(Utc::now());
            events::degradation_recovered(component);
        }
        true
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.open.contains_key(component)
    }

    /// Every episode, oldest first.
    pub fn episodes(&self) -> &[DegradationEpisode] {
        &self.episodes
    }

    pub fn active(&self) -> impl Iterator<Item = &DegradationEpisode> + '_ {
        self.open.values().filter_map(|&i| self.episodes.get(i))
    }

    pub fn episodes_for(&self, component: &str) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.component == component)
            .count()
    }
}
