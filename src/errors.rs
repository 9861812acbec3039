//! Error types.
//!
//! Each failure class gets its own enum so callers can tell them apart
//! without string matching: arithmetic preconditions ([`DomainError`]),
//! malicious or malformed peer values ([`ProtocolError`]), out-of-order use
//! of the engine ([`StateError`]) and authentication outcomes
//! ([`AuthenticationFailure`]). [`SrpError`] unions them for operations
//! that can fail in more than one class.

use core::fmt;
use std::error;

/// Precondition violation in the arithmetic or encoding layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DomainError {
    /// An operation required a strictly positive modulus.
    NonPositiveModulus,
    /// `extended_gcd` requires both inputs to be strictly positive.
    NonPositiveOperand,
    /// No modular inverse exists: `gcd(a, n) != 1`.
    NoInverse,
    /// Paired buffers or slices must have equal lengths.
    LengthMismatch { left: usize, right: usize },
    /// A transport-encoded value could not be decoded.
    InvalidEncoding,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveModulus => write!(f, "modulus must be > 0"),
            Self::NonPositiveOperand => write!(f, "operands must be > 0"),
            Self::NoInverse => write!(f, "no modular inverse exists"),
            Self::LengthMismatch { left, right } => {
                write!(f, "length mismatch: {left} != {right}")
            }
            Self::InvalidEncoding => write!(f, "invalid transport encoding"),
        }
    }
}

impl error::Error for DomainError {}

/// A peer-supplied protocol value that makes the exchange unsound.
///
/// Continuing after one of these would let a malicious server recover
/// secret material, so the attempt must be abandoned and a fresh ephemeral
/// key generated for any retry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProtocolError {
    /// The server's public value B lies outside (0, N).
    ServerValueOutOfRange,
    /// The scrambling parameter u hashed to zero.
    DegenerateScrambling,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerValueOutOfRange => {
                write!(f, "invalid server-supplied 'B', must be in (0, N)")
            }
            Self::DegenerateScrambling => write!(f, "scrambling parameter 'u' is zero"),
        }
    }
}

impl error::Error for ProtocolError {}

/// An engine method was invoked before its prerequisite step.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StateError {
    /// Accessor called before the protocol run reached the required state.
    IncompleteProtocol,
    /// A step was invoked out of order or repeated on the same instance.
    InvalidTransition,
    /// The attempt already failed; the instance must be discarded.
    Failed,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteProtocol => write!(f, "incomplete protocol"),
            Self::InvalidTransition => write!(f, "protocol step invoked out of order"),
            Self::Failed => write!(f, "attempt already failed"),
        }
    }
}

impl error::Error for StateError {}

/// Authentication failed after a complete, well-formed exchange.
///
/// The two variants demand different remediation: `VerifierRejected` means
/// the credentials did not match the stored verifier (retry with different
/// credentials), `ServerImpersonation` means the peer never knew the shared
/// key (distrust the server).
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AuthenticationFailure {
    /// The server reported that the client proof M1 did not verify.
    VerifierRejected,
    /// The server's proof M2 did not match the locally computed value.
    ServerImpersonation,
}

impl fmt::Display for AuthenticationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerifierRejected => write!(f, "server rejected the client proof"),
            Self::ServerImpersonation => write!(f, "server proof mismatch"),
        }
    }
}

impl error::Error for AuthenticationFailure {}

/// Union of all failure classes, for operations that can fail in more than
/// one of them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SrpError {
    Domain(DomainError),
    Protocol(ProtocolError),
    State(StateError),
    Authentication(AuthenticationFailure),
}

impl fmt::Display for SrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => e.fmt(f),
            Self::Protocol(e) => e.fmt(f),
            Self::State(e) => e.fmt(f),
            Self::Authentication(e) => e.fmt(f),
        }
    }
}

impl error::Error for SrpError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Protocol(e) => Some(e),
            Self::State(e) => Some(e),
            Self::Authentication(e) => Some(e),
        }
    }
}

impl From<DomainError> for SrpError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<ProtocolError> for SrpError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<StateError> for SrpError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

impl From<AuthenticationFailure> for SrpError {
    fn from(e: AuthenticationFailure) -> Self {
        Self::Authentication(e)
    }
}
