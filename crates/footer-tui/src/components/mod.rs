pub mod browse_view;
pub mod controls;
pub mod media_now;
pub mod player_box;
pub mod selector;
