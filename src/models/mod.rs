pub mod auth;
pub mod card;
pub mod collection;
pub mod page;
pub mod rarity;
pub mod search;

pub use auth::*;
pub use card::*;
pub use collection::*;
pub use page::*;
pub use rarity::*;
pub use search::*;
