pub mod api;
pub mod id;
pub mod models;

pub use id::{ObjectId, ParseObjectIdError};
pub use models::{DEFAULT_STATUS, Listing, Password};
