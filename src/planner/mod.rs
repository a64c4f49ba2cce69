pub mod event;
pub mod gamification;
pub mod layout;
pub mod routine;
pub mod storage;
pub mod store;
pub mod time;

pub use event::{has_conflict, Category, PlannerEvent};
pub use layout::DayGrid;
pub use store::EventStore;
