/*!

  Failures raised while declaring, elaborating, or linking circuits.

*/

/// A structural defect in a circuit description.
///
/// Every variant describes a malformed description, not bad signal data:
/// once a network links and verifies, all values are well-defined booleans.
/// Elaboration and linking are all-or-nothing per call; none of these
/// failures leave a partially usable instance behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElabError {
    /// A supplied net-name or handle list length differs from the declared
    /// arity of the prototype it feeds.
    ArityMismatch {
        /// What the list was for, e.g. the child or instance it feeds.
        scope: String,
        /// The arity the prototype declares.
        expected: usize,
        /// The length that was supplied.
        found: usize,
    },
    /// Two commands within one composite scope produce the same net name,
    /// or an external input name collides with a produced net.
    DuplicateNet {
        /// The composite whose scope holds the collision.
        scope: String,
        /// The offending net name.
        net: String,
    },
    /// A net name is consumed but never produced by any command nor
    /// declared as one of the composite's own inputs.
    UnresolvedNet {
        /// The composite whose scope lacks the net.
        scope: String,
        /// The name that failed to resolve.
        net: String,
    },
    /// A command was added to an already-finalized composite, or
    /// `finalize` was called twice.
    Frozen {
        /// The composite that is already frozen.
        scope: String,
    },
    /// A still-building composite was embedded as a child or instantiated.
    Building {
        /// The composite that has not been finalized.
        scope: String,
    },
    /// `link` was called a second time on the same instance.
    Relink {
        /// The prototype the instance was elaborated from.
        scope: String,
    },
    /// An output index at or past the declared output arity was requested.
    BadOutputIndex {
        /// The prototype the instance was elaborated from.
        scope: String,
        /// The requested index.
        index: usize,
        /// The declared output arity.
        arity: usize,
    },
    /// An input slot was still unbound when the store was verified.
    UnboundInput {
        /// Diagnostic label of the gate with the dangling slot.
        gate: String,
        /// The unbound slot index.
        slot: usize,
    },
    /// Verification found a cycle with no register on it. Such a loop has
    /// no stable evaluation order and is rejected outright.
    CombinationalCycle {
        /// Diagnostic label of a gate on the cycle.
        gate: String,
    },
}

impl std::fmt::Display for ElabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElabError::ArityMismatch {
                scope,
                expected,
                found,
            } => write!(
                f,
                "arity mismatch for {scope}: expected {expected} nets, found {found}"
            ),
            ElabError::DuplicateNet { scope, net } => {
                write!(f, "net '{net}' is defined more than once in '{scope}'")
            }
            ElabError::UnresolvedNet { scope, net } => write!(
                f,
                "net '{net}' in '{scope}' is never produced by a command nor declared as an input"
            ),
            ElabError::Frozen { scope } => {
                write!(f, "composite '{scope}' is already finalized")
            }
            ElabError::Building { scope } => {
                write!(f, "composite '{scope}' has not been finalized")
            }
            ElabError::Relink { scope } => {
                write!(f, "instance of '{scope}' is already linked")
            }
            ElabError::BadOutputIndex {
                scope,
                index,
                arity,
            } => write!(
                f,
                "output index {index} is out of bounds for '{scope}' with {arity} outputs"
            ),
            ElabError::UnboundInput { gate, slot } => {
                write!(f, "input slot {slot} of gate {gate} was never bound")
            }
            ElabError::CombinationalCycle { gate } => {
                write!(f, "combinational cycle through gate {gate}")
            }
        }
    }
}

impl std::error::Error for ElabError {}
