pub mod catalog;
pub mod cleanup;
pub mod inbox;
pub mod normalize;
pub mod query;

pub use catalog::CatalogService;
pub use inbox::{NotificationInbox, Submission};
