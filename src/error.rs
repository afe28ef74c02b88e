use thiserror::Error;

/// Broad category of a pipeline failure, used to pick the notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    MalformedInput,
}

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Image is {size} bytes, which exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("'{mime}' is not an image type")]
    NotAnImage { mime: String },

    #[error("No caret position available in the editor")]
    MissingCaret,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Upload rejected: {message}")]
    UploadRejected { message: String },

    #[error("Invalid response from upload gateway: {0}")]
    InvalidResponse(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

pub type PasteResult<T> = Result<T, PasteError>;

impl PasteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PasteError::FileTooLarge { .. }
            | PasteError::NotAnImage { .. }
            | PasteError::MissingCaret => ErrorKind::Validation,
            PasteError::Network(_)
            | PasteError::HttpStatus { .. }
            | PasteError::UploadRejected { .. }
            | PasteError::InvalidResponse(_) => ErrorKind::Network,
            PasteError::MalformedInput(_) => ErrorKind::MalformedInput,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            PasteError::FileTooLarge { limit, .. } => {
                format!("Image must not exceed {}MB", limit / (1024 * 1024))
            }
            PasteError::NotAnImage { .. } => "Please choose an image file".to_string(),
            PasteError::MissingCaret => "Place the cursor in the editor first".to_string(),
            PasteError::Network(msg) => format!("Image upload failed: {}", msg),
            PasteError::HttpStatus { status: 401, .. } => {
                "Please sign in as an administrator first".to_string()
            }
            PasteError::HttpStatus { status, .. } => {
                format!("Image upload failed: server responded with {}", status)
            }
            PasteError::UploadRejected { message } => format!("Image upload failed: {}", message),
            PasteError::InvalidResponse(msg) => format!("Image upload failed: {}", msg),
            PasteError::MalformedInput(msg) => format!("Nothing to paste: {}", msg),
        }
    }
}

impl From<reqwest::Error> for PasteError {
    fn from(err: reqwest::Error) -> Self {
        PasteError::Network(err.to_string())
    }
}
