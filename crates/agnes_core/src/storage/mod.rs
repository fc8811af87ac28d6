pub mod text_store;

pub use text_store::{Storage, store_path};
