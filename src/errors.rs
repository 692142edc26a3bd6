// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Errors which may occur during key exchange or public-key compression.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum InternalError {
    /// An input lay outside the domain of the operation consuming it:
    /// inversion of zero, a square root of a non-square, or a compressed
    /// key whose scalars disagree with its normalisation bit.
    DomainViolation(&'static str),
    /// A parameter failed validation: a secret key out of range or with
    /// the wrong divisibility, or a public key off the expected torsion.
    ParameterMismatch(&'static str),
    /// A state the arithmetic core can only reach through a bug: a
    /// pairing residue outside the cyclotomic subgroup, or a discrete-log
    /// digit outside its window table.  Fatal by contract.
    InternalInvariant(&'static str),
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InternalError::DomainViolation(n) => write!(f, "Domain violation: {}", n),
            InternalError::ParameterMismatch(n) => write!(f, "Parameter mismatch: {}", n),
            InternalError::InternalInvariant(n) => write!(f, "Internal invariant broken: {}", n),
        }
    }
}

#[cfg(feature = "std")]
impl ::std::error::Error for InternalError {}

/// Errors surfaced to users of the library.
///
/// Wraps [`InternalError`] to keep the internal taxonomy out of the
/// public API while still making the failure class inspectable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SidhError(pub(crate) InternalError);

impl SidhError {
    /// True if the failure was caused by an input outside the domain of
    /// the operation (e.g. a malformed or non-round-tripping key).
    pub fn is_domain_violation(&self) -> bool {
        matches!(self.0, InternalError::DomainViolation(_))
    }

    /// True if the failure was caused by an out-of-range or wrongly
    /// divisible parameter.
    pub fn is_parameter_mismatch(&self) -> bool {
        matches!(self.0, InternalError::ParameterMismatch(_))
    }
}

impl Display for SidhError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl ::std::error::Error for SidhError {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SidhError {
    fn from(e: InternalError) -> SidhError {
        SidhError(e)
    }
}
