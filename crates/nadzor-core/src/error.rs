use std::fmt;

/// Machine-readable error codes surfaced by the store layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RemoteFetchFailed,
    RemoteSaveFailed,
    CacheReadFailed,
    CacheWriteFailed,
    TemplateNameEmpty,
    InvalidTemplateTag,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RemoteFetchFailed => "E2001",
            Self::RemoteSaveFailed => "E2002",
            Self::CacheReadFailed => "E3001",
            Self::CacheWriteFailed => "E3002",
            Self::TemplateNameEmpty => "E4001",
            Self::InvalidTemplateTag => "E4002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and dialogs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RemoteFetchFailed => "Remote fetch failed",
            Self::RemoteSaveFailed => "Remote save failed",
            Self::CacheReadFailed => "Local cache read failed",
            Self::CacheWriteFailed => "Local cache write failed",
            Self::TemplateNameEmpty => "Template name is empty",
            Self::InvalidTemplateTag => "Invalid template tag",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced alongside the message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::RemoteFetchFailed => {
                Some("Working from the local cache; data syncs on the next successful save.")
            }
            Self::RemoteSaveFailed => {
                Some("The change is kept locally; retry once the server is reachable.")
            }
            Self::CacheReadFailed => None,
            Self::CacheWriteFailed => {
                Some("Check disk space and permissions for the data directory.")
            }
            Self::TemplateNameEmpty => Some("Provide a template name."),
            Self::InvalidTemplateTag => {
                Some("Use one of: general, deficiencies, violations.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
