//! JSON-RPC error bindings
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, fmt};

/// Represents a JSON-RPC error
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcError {
    pub code: ErrorCode,
    /// error message
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// New [`RpcError`] with the given [`ErrorCode`].
    pub const fn new(code: ErrorCode) -> Self {
        Self { message: Cow::Borrowed(code.message()), code, data: None }
    }

    /// Creates a new `InvalidParams` error.
    pub fn invalid_params<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self { code: ErrorCode::InvalidParams, message: message.into().into(), data: None }
    }

    /// Requested chains are not supported (CAIP-25 `5100`).
    pub const fn unsupported_chains() -> Self {
        Self::new(ErrorCode::UnsupportedChains)
    }

    /// Requested methods are not supported (CAIP-25 `5101`).
    pub const fn unsupported_methods() -> Self {
        Self::new(ErrorCode::UnsupportedMethods)
    }

    /// Requested notifications are not supported (CAIP-25 `5102`).
    pub const fn unsupported_notifications() -> Self {
        Self::new(ErrorCode::UnsupportedNotifications)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message == self.code.message() {
            return f.write_str(&self.message);
        }
        write!(f, "{}: {}", self.code.message(), self.message)
    }
}

impl std::error::Error for RpcError {}

/// List of JSON-RPC error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Server received Invalid JSON.
    /// server side error while parsing JSON
    ParseError,
    /// send invalid request object.
    InvalidRequest,
    /// method does not exist or valid
    MethodNotFound,
    /// invalid method parameter.
    InvalidParams,
    /// internal call error
    InternalError,
    /// The user rejected the request, see <https://eips.ethereum.org/EIPS/eip-1193#provider-errors>
    UserRejectedRequest,
    /// The requested method and/or account has not been authorized by the user.
    Unauthorized,
    /// The provider does not support the requested method.
    UnsupportedMethod,
    /// Requested chains are not supported, see <https://chainagnostic.org/CAIPs/caip-25>
    UnsupportedChains,
    /// Requested methods are not supported.
    UnsupportedMethods,
    /// Requested notifications are not supported.
    UnsupportedNotifications,
    /// Used for server specific errors.
    ServerError(i64),
}

impl ErrorCode {
    /// Returns the error code as `i64`
    pub fn code(&self) -> i64 {
        match *self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::UserRejectedRequest => 4001,
            Self::Unauthorized => 4100,
            Self::UnsupportedMethod => 4200,
            Self::UnsupportedChains => 5100,
            Self::UnsupportedMethods => 5101,
            Self::UnsupportedNotifications => 5102,
            Self::ServerError(c) => c,
        }
    }

    /// Returns the message associated with the error
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::UserRejectedRequest => "User rejected the request",
            Self::Unauthorized => "Unauthorized",
            Self::UnsupportedMethod => "Unsupported method",
            Self::UnsupportedChains => "Requested chains are not supported",
            Self::UnsupportedMethods => "Requested methods are not supported",
            Self::UnsupportedNotifications => "Requested notifications are not supported",
            Self::ServerError(_) => "Server error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'a> Deserialize<'a> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        i64::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            5100 => Self::UnsupportedChains,
            5101 => Self::UnsupportedMethods,
            5102 => Self::UnsupportedNotifications,
            _ => Self::ServerError(code),
        }
    }
}
