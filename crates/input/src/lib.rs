//! Pointer input for the axis viewer.
//!
//! Raw pointer events drive a small state machine: hovering highlights the
//! plane under the cursor, a click locks the view onto that plane's axis and
//! starts a camera fly-to, and a drag releases the lock.
//!
//! # Invariants
//! - At most one plane carries hover opacity.
//! - At most one axis is locked.
//! - The drag threshold is measured in screen pixels.

pub mod action;
pub mod interaction;
pub mod session;

pub use action::{Action, PointerEvent};
pub use interaction::{InteractionContext, InteractionController, InteractionState};
pub use session::{DRAG_THRESHOLD_PX, PointerSession};
