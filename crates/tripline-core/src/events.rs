use serde::{Deserialize, Serialize};

use crate::timeline::TimelineItem;

/// Everything the interaction engine asks of its host produces an Event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// Replace the displayed item set.
    ///
    /// With `defer_commit` the set is an in-progress preview and must not be
    /// treated as durable.
    #[serde(rename_all = "camelCase")]
    ItemsUpdated {
        items: Vec<TimelineItem>,
        defer_commit: bool,
    },
    /// Change the selection; `id: None` clears it.
    #[serde(rename_all = "camelCase")]
    Selected {
        id: Option<String>,
        #[serde(flatten)]
        options: SelectOptions,
    },
}

/// Extra context for a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    /// Add to the selection rather than replace it.
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub is_city: bool,
}

impl Event {
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            Self::ItemsUpdated {
                defer_commit: false,
                ..
            }
        )
    }

    /// Hand the event to a host's callbacks.
    pub fn deliver<H: TimelineHost + ?Sized>(self, host: &mut H) {
        match self {
            Self::ItemsUpdated {
                items,
                defer_commit,
            } => host.on_update_items(items, defer_commit),
            Self::Selected { id, options } => host.on_select(id, options),
        }
    }
}

/// Callback surface of the presentation layer.
pub trait TimelineHost {
    fn on_update_items(&mut self, items: Vec<TimelineItem>, defer_commit: bool);
    fn on_select(&mut self, id: Option<String>, options: SelectOptions);
}
