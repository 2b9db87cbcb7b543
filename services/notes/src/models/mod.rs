//! Domain models and page payloads

pub mod image;
pub mod note;
pub mod user;

pub use image::{ImageChange, ImageSummary, NewImage, NoteImage};
pub use note::{NewNote, Note, NoteSummary, NoteUpdate, NoteWithImages};
pub use user::{User, UserImage, is_valid_username};
