use crate::declaration::registry::DeclarationRegistry;
use crate::kernel::component::ComponentId;
use crate::kernel::error::{Error, Result};

/// A named group of component identities imported together.
///
/// A bundle carries no lifecycle semantics of its own; it only asserts that
/// each of its members has been declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    members: Vec<ComponentId>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add the component type `T` as a member
    pub fn member<T: ?Sized + 'static>(self) -> Self {
        self.member_id(ComponentId::of::<T>())
    }

    /// Add a member by identity
    pub fn member_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.members.push(id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ComponentId] {
        &self.members
    }

    /// Check every member against the registry, naming the first missing one.
    pub fn verify(&self, registry: &DeclarationRegistry) -> Result<()> {
        match self.members.iter().find(|id| !registry.is_declared(id)) {
            Some(missing) => Err(Error::UnknownBundleMember {
                bundle: self.name.clone(),
                id: missing.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl DeclarationRegistry {
    /// See [`Bundle::verify`].
    pub fn verify_bundle(&self, bundle: &Bundle) -> Result<()> {
        bundle.verify(self)
    }
}
