//! The site-pair record produced by the toolkit's alignment step. Detection of
//! mismatches between a reference and a chromatogram lives upstream; plotting only
//! consumes the result.

use std::fmt;

use bincode::{Decode, Encode};

/// A single mismatch between the reference sequence and a chromatogram.
///
/// `ref_pos` and `cf_pos` are 1-based, matching how positions are reported to users.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct SitePair {
    /// Position on the reference.
    pub ref_pos: usize,
    pub ref_base: char,
    /// Position on the chromatogram.
    pub cf_pos: usize,
    pub cf_base: char,
    /// Basecall quality at the chromatogram position, if known. Upstream filtering
    /// uses this to decide whether a site passes.
    pub cf_qual: Option<u8>,
}

impl fmt::Display for SitePair {
    /// The conventional mutation shorthand, eg `G123T`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.ref_base, self.ref_pos, self.cf_base)
    }
}
