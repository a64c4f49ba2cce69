pub mod day_view;
pub mod event_form;
pub mod status_bar;
pub mod toasts;

pub use day_view::DayView;
pub use event_form::EventForm;
pub use status_bar::StatusBar;
pub use toasts::Toasts;
