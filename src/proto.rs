/*!

  Prototypes: immutable, reusable circuit descriptions.

*/

use crate::error::ElabError;
use crate::gate::GateKind;
use crate::instance::Instance;
use crate::path::InstancePath;
use crate::store::GateStore;
use bitvec::vec::BitVec;

/// A reusable description of a circuit, not yet bound to concrete gates.
///
/// Prototypes are shared behind [Rc](std::rc::Rc) and may be instantiated
/// any number of times; each instantiation elaborates a fresh set of gates
/// into the given store.
pub trait Prototype {
    /// Declared input arity.
    fn num_inputs(&self) -> usize;

    /// Declared output arity.
    fn num_outputs(&self) -> usize;

    /// Diagnostic name of the circuit type this prototype describes.
    fn type_name(&self) -> &str;

    /// Returns `true` once the description is immutable and safe to embed
    /// in other composites or instantiate. Primitives are always frozen;
    /// composites report their declaration state.
    fn is_frozen(&self) -> bool {
        true
    }

    /// Elaborates one concrete instance against `store`, registering every
    /// owned gate, and returns it unlinked. `path` seeds the diagnostic
    /// labels of the created gates.
    fn instantiate(
        &self,
        store: &mut GateStore,
        path: &InstancePath,
    ) -> Result<Instance, ElabError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimitiveKind {
    Low,
    Nand,
    Register,
}

/// A prototype wrapping exactly one stateless-description gate kind with a
/// single output.
///
/// All three values are free of per-use state, so the shared constants
/// [LOW](Self::LOW), [NAND](Self::NAND), and [REGISTER](Self::REGISTER)
/// serve every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePrototype {
    kind: PrimitiveKind,
}

impl GatePrototype {
    /// The constant-low source: zero inputs, always `false`.
    pub const LOW: Self = Self {
        kind: PrimitiveKind::Low,
    };

    /// The universal NAND gate: `NOT(a AND b)`.
    pub const NAND: Self = Self {
        kind: PrimitiveKind::Nand,
    };

    /// A clocked register: repeats its input with a one-tick delay,
    /// starting from `false`.
    pub const REGISTER: Self = Self {
        kind: PrimitiveKind::Register,
    };
}

impl Prototype for GatePrototype {
    fn num_inputs(&self) -> usize {
        match self.kind {
            PrimitiveKind::Low => 0,
            PrimitiveKind::Nand => 2,
            PrimitiveKind::Register => 1,
        }
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn type_name(&self) -> &str {
        match self.kind {
            PrimitiveKind::Low => "low",
            PrimitiveKind::Nand => "nand",
            PrimitiveKind::Register => "register",
        }
    }

    fn instantiate(
        &self,
        store: &mut GateStore,
        path: &InstancePath,
    ) -> Result<Instance, ElabError> {
        let kind = match self.kind {
            PrimitiveKind::Low => GateKind::Low,
            PrimitiveKind::Nand => GateKind::Nand,
            PrimitiveKind::Register => GateKind::Register { value: false },
        };
        let id = store.insert(kind, path.with_type(self.type_name()));
        Ok(Instance::gate(
            id,
            self.num_inputs(),
            self.num_outputs(),
            self.type_name(),
        ))
    }
}

/// A prototype for a labelled probe: one input, no outputs.
///
/// A probe records its input value once per tick into a waveform readable
/// from the store. It carries a label, so unlike [GatePrototype] it is
/// constructed fresh per use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePrototype {
    label: String,
}

impl ProbePrototype {
    /// Creates a probe prototype with the given waveform label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Prototype for ProbePrototype {
    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        0
    }

    fn type_name(&self) -> &str {
        "probe"
    }

    fn instantiate(
        &self,
        store: &mut GateStore,
        path: &InstancePath,
    ) -> Result<Instance, ElabError> {
        let kind = GateKind::Probe {
            label: self.label.clone(),
            trace: BitVec::new(),
        };
        let id = store.insert(kind, path.with_type(self.type_name()));
        Ok(Instance::gate(id, 1, 0, self.type_name()))
    }
}
