pub mod listing;
pub mod model;

pub use listing::FileListing;
pub use model::{load_program, words_from_bytes, Program, TrailingPolicy};
