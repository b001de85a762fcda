//! Per-run session storage: notes, uploaded files and the meeting transcript
//! of the current session, persisted under the app-data directory.
//!
//! One session is current at a time. [`SessionManager`] is the filesystem
//! implementation of [`SessionStore`]; the application context holds it as
//! `Arc<dyn SessionStore>`.

pub mod data;
pub mod manager;
pub mod store;


pub use data::{SessionData, UploadedFile};
pub use manager::{is_session_id, session_id_for, sessions_dir, SessionManager};
pub use store::SessionStore;
