//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use footer_proto::catalog::Catalog;
use footer_proto::protocol::{Browse, StoreSnapshot, Stream};

pub struct AppState {
    /// Mirror of the store, refreshed after every message the App handles.
    /// The footer keeps its own view and does not read this.
    pub store: StoreSnapshot,
    pub catalog: Catalog,
    /// Width from which the footer draws the wide control group.
    pub wide_min_width: u16,
    /// JSON of the last command sent to the store.
    pub last_command: Option<String>,
    pub footer_subscribed: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, wide_min_width: u16) -> Self {
        Self {
            store: StoreSnapshot::default(),
            catalog,
            wide_min_width,
            last_command: None,
            footer_subscribed: false,
        }
    }

    /// Convenience: the stream loaded in the store.
    pub fn loaded_stream(&self) -> Option<&Stream> {
        let stream = &self.store.profile.stream;
        stream.is_loaded().then_some(stream)
    }

    pub fn showing_media_list(&self) -> bool {
        self.store.current_browse == Browse::ShowStreamMediaList
    }
}
