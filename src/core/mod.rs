pub mod errors;
pub mod logging;
pub mod models;
pub mod utils;

pub use errors::SyncError;
pub use models::{
    PhoneticPiece,
    VocabEntry,
};
