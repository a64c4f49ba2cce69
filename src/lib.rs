pub mod app;
pub mod components;
pub mod event;
pub mod planner;
pub mod theme;
pub mod toast;
pub mod tui;
