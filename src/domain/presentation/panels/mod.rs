pub mod help_panel;
pub mod settings_panel;
pub mod status_panel;

pub use help_panel::show_help_panel;
pub use settings_panel::show_settings_panel;
pub use status_panel::show_status_panel;
