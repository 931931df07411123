//! Chain error types.
//!
//! These errors mean a structural invariant of a wagon chain was about to
//! be broken. They indicate a caller defect, not a routine rejection:
//! capacity or type mismatches are reported as `false` by the train
//! operations instead.

use super::WagonId;

/// Structural errors raised by the wagon chain primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// One of the two link slots involved in an attach is already occupied
    #[error("cannot attach {wagon} behind {predecessor}: {reason}")]
    StructuralConflict {
        wagon: WagonId,
        predecessor: WagonId,
        reason: &'static str,
    },

    /// The attach target lies in the wagon's own successor chain
    #[error("cannot attach {wagon} behind {target}: target is part of its own tail")]
    SelfAttachmentConflict { wagon: WagonId, target: WagonId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ChainError::StructuralConflict {
            wagon: WagonId::new(2),
            predecessor: WagonId::new(1),
            reason: "wagon already has a predecessor",
        };
        assert_eq!(
            err.to_string(),
            "cannot attach Wagon-2 behind Wagon-1: wagon already has a predecessor"
        );

        let err = ChainError::SelfAttachmentConflict {
            wagon: WagonId::new(1),
            target: WagonId::new(3),
        };
        assert_eq!(
            err.to_string(),
            "cannot attach Wagon-1 behind Wagon-3: target is part of its own tail"
        );
    }
}
