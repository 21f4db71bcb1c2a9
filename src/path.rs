/*!

  Hierarchical diagnostic labels for elaborated gates.

*/

/// Accumulates a human-readable label while a prototype tree is elaborated.
///
/// Each composite appends its type name as a `[type]` segment and, when a
/// command was declared with a child id, a `{child}:` segment; the primitive
/// at the bottom appends its own kind. The resulting label is attached to
/// the gate in the store and carries no semantic weight in the simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    label: String,
}

impl InstancePath {
    /// Creates an empty path for a top-level instantiation.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a `[type]` segment appended.
    pub fn with_type(&self, type_name: &str) -> Self {
        let label = if self.label.is_empty() {
            format!("[{type_name}]")
        } else {
            format!("{} [{type_name}]", self.label)
        };
        Self { label }
    }

    /// Returns a new path with a `{child}:` segment appended.
    pub fn with_child(&self, child_id: &str) -> Self {
        let label = if self.label.is_empty() {
            format!("{{{child_id}}}:")
        } else {
            format!("{} {{{child_id}}}:", self.label)
        };
        Self { label }
    }

    /// Returns the accumulated label.
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for InstancePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
