/*!

  Primitive gates and the handles that address them.

*/

use crate::path::InstancePath;
use bitvec::vec::BitVec;

/// A stable handle to a gate owned by a [GateStore](crate::store::GateStore).
///
/// Handles are plain indices into the store's arena: they are `Copy`, never
/// dangle, and stay valid for the lifetime of the store that issued them.
/// Input slots and composite net tables hold these instead of references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateId(pub(crate) usize);

impl GateId {
    /// Returns the arena index behind the handle.
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// The closed set of primitive gate kinds.
///
/// Every circuit in the crate elaborates down to these four elements.
/// The two stateful kinds carry their state inline: a register holds the
/// value latched at the previous tick boundary, a probe holds the waveform
/// it has recorded so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GateKind {
    /// Drives a constant logical low.
    Low,
    /// The universal gate: `NOT(a AND b)`.
    Nand,
    /// A one-tick delay element; its output is the value its input held
    /// before the most recent tick.
    Register { value: bool },
    /// A labelled observer that records its input once per tick. Probes
    /// are sinks and have no output.
    Probe { label: String, trace: BitVec },
}

impl GateKind {
    /// Number of input slots for this kind.
    pub(crate) fn arity(&self) -> usize {
        match self {
            GateKind::Low => 0,
            GateKind::Nand => 2,
            GateKind::Register { .. } | GateKind::Probe { .. } => 1,
        }
    }

    /// Diagnostic name of the kind.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            GateKind::Low => "low",
            GateKind::Nand => "nand",
            GateKind::Register { .. } => "register",
            GateKind::Probe { .. } => "probe",
        }
    }

    /// Returns `true` if the kind participates in the two-phase tick.
    pub(crate) fn is_stateful(&self) -> bool {
        matches!(self, GateKind::Register { .. } | GateKind::Probe { .. })
    }
}

/// A gate value owned by the store's arena.
#[derive(Debug)]
pub(crate) struct Gate {
    /// The kind of the gate, including any latched state.
    pub(crate) kind: GateKind,
    /// One slot per declared input; `None` until bound by linking.
    pub(crate) inputs: Vec<Option<GateId>>,
    /// The hierarchical diagnostic label assigned at elaboration.
    pub(crate) path: InstancePath,
}

impl Gate {
    pub(crate) fn new(kind: GateKind, path: InstancePath) -> Self {
        let inputs = vec![None; kind.arity()];
        Self { kind, inputs, path }
    }
}
