pub mod host;
pub mod selection;
pub mod session;
pub mod tracker;

pub use host::{Document, EditorHost};
pub use selection::{InsertionTarget, Selection};
pub use session::{PasteOutcome, PasteSession, PendingInsertion};
pub use tracker::{UploadGuard, UploadTracker};
