use std::collections::HashSet;

use crate::kernel::component::ComponentId;
use crate::resolver::error::ResolutionError;

/// The set of identities currently being resolved, in entry order.
///
/// Entering an identity that is already in flight is a cycle; the error
/// carries the path from the first entry of that identity back to itself.
#[derive(Debug, Default, Clone)]
pub struct ResolutionStack {
    path: Vec<ComponentId>,
    in_flight: HashSet<ComponentId>,
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as in flight.
    pub fn enter(&mut self, id: ComponentId) -> Result<(), ResolutionError> {
        if self.in_flight.contains(&id) {
            let start = self.path.iter().position(|entered| *entered == id).unwrap_or(0);
            let mut cycle = self.path[start..].to_vec();
            cycle.push(id);
            return Err(ResolutionError::CyclicDependency { cycle });
        }
        self.in_flight.insert(id.clone());
        self.path.push(id);
        Ok(())
    }

    /// Clear the in-flight marker of the most recently entered identity.
    /// Returns false when `id` is not on top of the stack.
    pub fn leave(&mut self, id: &ComponentId) -> bool {
        if self.path.last() != Some(id) {
            return false;
        }
        self.path.pop();
        self.in_flight.remove(id);
        true
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.in_flight.contains(id)
    }

    /// In-flight identities, outermost first.
    pub fn path(&self) -> &[ComponentId] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
