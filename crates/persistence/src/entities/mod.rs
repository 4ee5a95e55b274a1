//! Entity definitions (database row mappings).

pub mod content;
pub mod guest;
pub mod user;
pub mod wedding;

pub use content::{EventEntity, GalleryPhotoEntity};
pub use guest::{AttendanceDb, GuestEntity, WishEntity};
pub use user::{AdminEntity, AdminRoleDb, UserEntity, UserWithWeddingEntity};
pub use wedding::{MenuConfigEntity, WeddingEntity, WeddingSummaryEntity};
