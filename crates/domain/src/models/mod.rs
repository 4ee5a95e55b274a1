//! Domain models for the wedding invitation backend.

pub mod dashboard;
pub mod event;
pub mod gallery;
pub mod guest;
pub mod menu_config;
pub mod user;
pub mod wedding;
pub mod wish;

pub use dashboard::{DashboardStats, GuestCounts};
pub use event::{Event, EventType};
pub use gallery::GalleryPhoto;
pub use guest::{Attendance, Guest, GuestScope};
pub use menu_config::{MenuConfig, MenuOrder, MenuSection};
pub use user::{Admin, AdminRole, User};
pub use wedding::{Wedding, WeddingData, WeddingSummary};
pub use wish::Wish;
