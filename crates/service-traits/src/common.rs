//! Message types shared by every backend package.

/// Business-error sentinel embedded in every backend response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Error {
    NoError = 0,
    Unknown = 1,
    AlreadyExists = 2,
    NotFound = 3,
    BadRequest = 4,
}

impl Error {
    /// Wire name of the value, as declared in the protobuf definition.
    #[must_use]
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::NoError => "NO_ERROR",
            Self::Unknown => "UNKNOWN",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SortingDirection {
    Ascending = 0,
    Descending = 1,
}

/// Relay pagination window. Each value is only honoured when its `has_*`
/// companion flag is set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pagination {
    #[prost(bool, tag = "1")]
    pub has_after: bool,
    #[prost(string, tag = "2")]
    pub after: String,
    #[prost(bool, tag = "3")]
    pub has_first: bool,
    #[prost(int32, tag = "4")]
    pub first: i32,
    #[prost(bool, tag = "5")]
    pub has_before: bool,
    #[prost(string, tag = "6")]
    pub before: String,
    #[prost(bool, tag = "7")]
    pub has_last: bool,
    #[prost(int32, tag = "8")]
    pub last: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SortingOptionPair {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "SortingDirection", tag = "2")]
    pub direction: i32,
}

// ── Business outcome ────────────────────────────────────────────────────────

/// Access to the error sentinel and message carried by a backend response.
pub trait BusinessOutcome {
    /// Raw sentinel value as received on the wire.
    fn sentinel(&self) -> i32;

    fn error_message(&self) -> &str;

    /// Decoded sentinel. Values this build does not know are reported as
    /// [`Error::Unknown`], never as success.
    fn outcome(&self) -> Error {
        Error::try_from(self.sentinel()).unwrap_or(Error::Unknown)
    }

    fn is_success(&self) -> bool {
        self.outcome() == Error::NoError
    }
}

/// Implement [`BusinessOutcome`] for response messages carrying `error` and
/// `error_message` fields.
#[macro_export]
macro_rules! impl_business_outcome {
    ($($response:ty),+ $(,)?) => {
        $(
            impl $crate::common::BusinessOutcome for $response {
                fn sentinel(&self) -> i32 {
                    self.error
                }

                fn error_message(&self) -> &str {
                    &self.error_message
                }
            }
        )+
    };
}
