pub mod cli;
pub mod clipboard;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod markup;
pub mod notify;
pub mod terminal_spinner;
pub mod upload;

pub use clipboard::{ClipboardItem, ClipboardPayload, PasteDecision, PasteEvent, PasteRoute, classify};
pub use config::{AppConfig, GatewayConfig};
pub use console::{Console, VerbosityLevel, console, init_console};
pub use editor::{Document, EditorHost, PasteOutcome, PasteSession, PendingInsertion, Selection};
pub use error::{ErrorKind, PasteError, PasteResult};
pub use markup::{MarkupNode, NodeKind, html_to_markup};
pub use notify::{Notifier, RecordingNotifier};
pub use upload::{ImageFile, ImageLocalizer, UploadGateway, UploadedImage};
