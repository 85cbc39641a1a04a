use std::fmt;
use std::sync::Mutex;

/// A user facing notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Something worked.
    Success(String),
    /// A call failed. The user can generally try again.
    Error { title: String, text: String },
    /// Input was rejected before any network call was made.
    Validation(String),
    /// An edit was refused, eg removing the last row of a list.
    Refused(String),
}

impl Notice {
    pub fn error(title: &str, text: &str) -> Notice {
        Notice::Error {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            Notice::Error { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "✔ {}", msg),
            Notice::Error { title, text } => write!(f, "✘ {}: {}", title, text),
            Notice::Validation(msg) => write!(f, "! {}", msg),
            Notice::Refused(msg) => write!(f, "! {}", msg),
        }
    }
}

pub trait Notify {
    fn notify(&self, notice: Notice);
}

/// Prints notices to the terminal, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            error!("{:?}", &notice);
            eprintln!("{}", notice);
        } else {
            println!("{}", notice);
        }
    }
}

/// Keeps every notice it is handed. Useful for tests and for callers that want to show notices
/// after the fact.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        Default::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
