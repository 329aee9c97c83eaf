//! The database contract shared by every container kind.

use seasnake_core::{Limits, Result};

/// A whole-buffer encodable unit ("a seasnake database")
///
/// `encode` and `decode` are atomic over the whole buffer. `decode` clears the
/// target first; when it fails the target is left in an unspecified state and
/// must be discarded, never reused.
pub trait Database: Sized {
    /// Subformat tag written to and expected in the header
    const SUBFORMAT: u8;

    /// Encode the full buffer, header included
    fn encode(&self) -> Result<Vec<u8>>;

    /// Replace the contents with what `bytes` holds, enforcing `limits`
    fn decode_with_limits(&mut self, bytes: &[u8], limits: &Limits) -> Result<()>;

    /// Replace the contents with what `bytes` holds
    fn decode(&mut self, bytes: &[u8]) -> Result<()> {
        self.decode_with_limits(bytes, &Limits::default())
    }

    /// Decode a fresh value from `bytes`
    fn from_slice(bytes: &[u8]) -> Result<Self>
    where
        Self: Default,
    {
        let mut db = Self::default();
        db.decode(bytes)?;
        Ok(db)
    }
}
