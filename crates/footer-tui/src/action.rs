//! Action enum: all user-initiated intents and internal events.

use footer_proto::protocol::StoreAction;

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Footer controls ──────────────────────────────────────────────────────
    ShowFullScreen,
    ToggleFold,
    ListMedia,

    // ── Pickers ──────────────────────────────────────────────────────────────
    SelectUp,
    SelectDown,
    /// Load the highlighted stream; `true` also starts playback.
    LoadSelected(bool),
    CyclePlayer,
    NextTrack,
    PrevTrack,

    // ── Body ─────────────────────────────────────────────────────────────────
    /// Leave the full-screen or media-list view.
    BackToDashboard,

    // ── System ───────────────────────────────────────────────────────────────
    SendCommand(StoreAction),
    Quit,
    Resize(u16, u16),
}
