//! Controller slot: owns the one mounted playback controller.

use ratatui::{layout::Rect, Frame};
use tracing::info;

use super::branch::{ControllerBranch, ControllerKind};

/// A playback controller living in the footer's controller slot.
pub trait PlaybackController: Send {
    fn kind(&self) -> ControllerKind;

    /// New props.  `play` in the props is true for exactly one update after
    /// a load-and-play.
    fn update(&mut self, branch: &ControllerBranch<'_>);

    fn draw(&self, frame: &mut Frame, area: Rect, folded: bool);

    /// Called once, before the controller is dropped.
    fn unmount(&mut self);
}

/// Builds controllers on demand.  Swappable so tests can observe mounts.
pub trait ControllerFactory: Send {
    fn mount(&mut self, kind: ControllerKind) -> Box<dyn PlaybackController>;
}

pub struct ControllerSlot {
    factory: Box<dyn ControllerFactory>,
    mounted: Option<Box<dyn PlaybackController>>,
}

impl ControllerSlot {
    pub fn new(factory: Box<dyn ControllerFactory>) -> Self {
        Self {
            factory,
            mounted: None,
        }
    }

    pub fn mounted_kind(&self) -> Option<ControllerKind> {
        self.mounted.as_ref().map(|c| c.kind())
    }

    /// Bring the slot in line with `branch`.  A kind change unmounts the old
    /// controller before the new one is built.
    pub fn reconcile(&mut self, branch: &ControllerBranch<'_>) {
        let wanted = branch.kind();
        if self.mounted_kind() != Some(wanted) {
            self.clear();
            info!("footer: mounting {:?} controller", wanted);
            self.mounted = Some(self.factory.mount(wanted));
        }
        if let Some(controller) = self.mounted.as_mut() {
            controller.update(branch);
        }
    }

    pub fn clear(&mut self) {
        if let Some(mut old) = self.mounted.take() {
            info!("footer: unmounting {:?} controller", old.kind());
            old.unmount();
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, folded: bool) {
        if let Some(controller) = self.mounted.as_ref() {
            controller.draw(frame, area, folded);
        }
    }
}

impl Drop for ControllerSlot {
    fn drop(&mut self) {
        self.clear();
    }
}
