//! Error types for the nodenet core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by a [`crate::RandomSource`] when asked for a sample it
/// cannot draw.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RandomSourceError {
    /// Distribution parameters were rejected.
    #[error("invalid {distribution} parameters: {reason}")]
    InvalidParameter {
        /// Name of the distribution being sampled.
        distribution: &'static str,
        /// Human-readable explanation of the rejection.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`RandomSourceError`] variants.
    enum RandomSourceErrorCode for RandomSourceError {
        /// Distribution parameters were rejected.
        InvalidParameter => InvalidParameter { .. } => "RANDOM_SOURCE_INVALID_PARAMETER",
    }
}

/// Error type produced by [`crate::Network`] operations and
/// [`crate::NetworkBuilder`] validation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    /// A node index was not below the current node count.
    #[error("node index {index} is out of range for a network of {size} nodes")]
    OutOfRange {
        /// The requested node index.
        index: usize,
        /// Node count at the time of the request.
        size: usize,
    },
    /// A link was requested from a node to itself.
    #[error("cannot link node {node} to itself")]
    SelfLink {
        /// The node named on both ends of the link.
        node: usize,
    },
    /// A link endpoint was not below the current node count.
    #[error("cannot link {origin} and {target} in a network of {size} nodes")]
    LinkOutOfRange {
        /// First endpoint supplied by the caller.
        origin: usize,
        /// Second endpoint supplied by the caller.
        target: usize,
        /// Node count at the time of the request.
        size: usize,
    },
    /// The mean degree passed to random connection was negative, not finite,
    /// or above [`crate::MAX_POISSON_MEAN`].
    #[error("mean degree must lie in 0..={max:e} (got {mean})", max = crate::MAX_POISSON_MEAN)]
    InvalidMeanDegree {
        /// The rejected mean degree.
        mean: f64,
    },
    /// Builder options were inconsistent.
    #[error("invalid network configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable explanation of the rejection.
        reason: String,
    },
    /// The random source failed to produce a sample.
    #[error("random source failed: {error}")]
    Sampling {
        /// Underlying random source error.
        #[from]
        error: RandomSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// A node index was not below the current node count.
        OutOfRange => OutOfRange { .. } => "NETWORK_OUT_OF_RANGE",
        /// A link was requested from a node to itself.
        SelfLink => SelfLink { .. } => "NETWORK_SELF_LINK",
        /// A link endpoint was not below the current node count.
        LinkOutOfRange => LinkOutOfRange { .. } => "NETWORK_LINK_OUT_OF_RANGE",
        /// The mean degree passed to random connection was invalid.
        InvalidMeanDegree => InvalidMeanDegree { .. } => "NETWORK_INVALID_MEAN_DEGREE",
        /// Builder options were inconsistent.
        InvalidConfiguration => InvalidConfiguration { .. } => "NETWORK_INVALID_CONFIGURATION",
        /// The random source failed to produce a sample.
        SamplingFailure => Sampling { .. } => "NETWORK_SAMPLING_FAILURE",
    }
}

impl NetworkError {
    /// Returns `true` for the two rejections raised by
    /// [`crate::Network::add_link`].
    #[must_use]
    pub const fn is_invalid_link(&self) -> bool {
        matches!(self, Self::SelfLink { .. } | Self::LinkOutOfRange { .. })
    }

    /// Retrieve the inner [`RandomSourceErrorCode`] when the error originated
    /// in a [`crate::RandomSource`].
    #[must_use]
    pub const fn sampling_code(&self) -> Option<RandomSourceErrorCode> {
        match self {
            Self::Sampling { error } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, NetworkError>;
