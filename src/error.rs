use derive_more::derive::{Display, Error};

use crate::group::PixelGroup;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Configuration errors.
///
/// These are wiring mistakes. Firmware is expected to abort startup on them
/// rather than carry on with a partially configured device.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The group already had a strip (or had one released at shutdown).
    #[display("A pixel group was configured twice ({})", _0.as_str())]
    AlreadyConfigured(#[error(not(source))] PixelGroup),
}
