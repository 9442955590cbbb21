use std::collections::HashMap;

use crate::config::settings::DuplicatePolicy;
use crate::kernel::component::{ComponentId, Declaration};
use crate::kernel::error::{Error, Result};
use crate::resolver::error::ResolutionError;

/// What a call to [`DeclarationRegistry::declare`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclareOutcome {
    /// The declaration was recorded.
    Declared,
    /// An earlier declaration of the same identity was kept and this one dropped.
    Ignored,
}

/// Registry of component declarations, kept in declaration order.
#[derive(Debug, Default)]
pub struct DeclarationRegistry {
    declarations: Vec<Declaration>,
    index: HashMap<ComponentId, usize>,
    policy: DuplicatePolicy,
    frozen: bool,
}

impl DeclarationRegistry {
    /// Create an empty registry with the given duplicate policy
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Record a declaration.
    ///
    /// A second declaration of the same identity is dropped under
    /// [`DuplicatePolicy::KeepFirst`] and rejected with
    /// [`Error::DuplicateDeclaration`] under [`DuplicatePolicy::Reject`].
    /// Once frozen the registry refuses everything with
    /// [`Error::LifecycleAlreadyStarted`].
    pub fn declare(&mut self, declaration: impl Into<Declaration>) -> Result<DeclareOutcome> {
        if self.frozen {
            return Err(Error::LifecycleAlreadyStarted);
        }
        let declaration = declaration.into();
        if self.index.contains_key(declaration.id()) {
            return match self.policy {
                DuplicatePolicy::KeepFirst => {
                    log::debug!("Ignoring duplicate declaration of '{}'", declaration.id());
                    Ok(DeclareOutcome::Ignored)
                }
                DuplicatePolicy::Reject => Err(Error::DuplicateDeclaration {
                    id: declaration.id().clone(),
                }),
            };
        }
        log::trace!(
            "Declared '{}' (load order {}, {} dependencies)",
            declaration.id(),
            declaration.load_order(),
            declaration.dependencies().len()
        );
        self.index.insert(declaration.id().clone(), self.declarations.len());
        self.declarations.push(declaration);
        Ok(DeclareOutcome::Declared)
    }

    pub fn is_declared(&self, id: &ComponentId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Declaration> {
        self.index.get(id).map(|&position| &self.declarations[position])
    }

    /// Load-order hint of a declared component.
    pub fn load_order_of(&self, id: &ComponentId) -> Result<i32> {
        self.require(id).map(Declaration::load_order)
    }

    /// Ordered dependency identities of a declared component.
    pub fn dependencies_of(&self, id: &ComponentId) -> Result<&[ComponentId]> {
        self.require(id).map(Declaration::dependencies)
    }

    /// Position of the identity in declaration order.
    pub fn position_of(&self, id: &ComponentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Declarations in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Identities in declaration order.
    pub fn ids(&self) -> Vec<ComponentId> {
        self.declarations.iter().map(|d| d.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    fn require(&self, id: &ComponentId) -> Result<&Declaration> {
        self.get(id).ok_or_else(|| {
            Error::Resolution(ResolutionError::UnknownIdentity {
                id: id.clone(),
                required_by: None,
            })
        })
    }
}
