//! Data models for the LocalLibrary catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod user;
pub mod visit;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookShort};
pub use book_instance::{BookInstance, LoanStatus};
pub use genre::Genre;
pub use user::{User, UserClaims};
pub use visit::VisitCount;
