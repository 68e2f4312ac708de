pub mod json;
pub mod traits;

pub use traits::{CityStorage, CommentStorage, OfferStorage, UserStorage};
