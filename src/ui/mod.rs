//! # User Interface Module
//!
//! Dear ImGui integration and the playground's control panel.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui context, winit input forwarding and wgpu drawing
//! - [`playground_panel`] - Shape buttons, Clear, the background select and
//!   the object count label
//!
//! ## Input Handling
//!
//! While the pointer is over a UI window, picking and camera controls ignore
//! mouse input.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{playground_panel, PanelState};
