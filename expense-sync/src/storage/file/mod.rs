//! # File Storage
//!
//! `LocalStore` implementation backed by one JSON file per key inside the
//! data directory.
//!
//! ## File Structure
//!
//! ```text
//! ExpenseTracker/
//! ├── current_user.json     ← logged-in identity
//! └── expenses_{user_id}.json  ← that user's expense snapshot
//! ```

pub mod connection;
pub mod key_value_store;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use key_value_store::FileStore;
