//! Domain modules split by discipline.
//! - `controls`: key bindings mapped onto scene commands.
//! - `presentation`: egui overlays.
//! - `render`: board and piece geometry driven by committed state.
//! - `simulation`: board, movement, camera orbit and the command handler.

pub mod controls;
pub mod presentation;
pub mod render;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use render::RenderPlugin;
pub use simulation::SimPlugin;
