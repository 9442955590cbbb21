//! # Gantry Core Resolver
//!
//! Turns the declaration registry into a [`ConstructionPlan`]: the exact
//! sequence in which components are constructed and initialized.
//!
//! Top-level traversal is seeded by ascending load-order hint, ties broken by
//! declaration order. Each seed is resolved depth-first, dependencies in their
//! declared order, so a dependency always precedes its dependents whatever
//! their hints. The traversal keeps an explicit frame stack and a
//! [`ResolutionStack`] of in-flight identities; re-entering one is reported as
//! [`ResolutionError::CyclicDependency`] and a dependency on an undeclared
//! identity as [`ResolutionError::UnknownIdentity`].
pub mod error;
pub mod stack;

use std::collections::HashSet;
use std::fmt;

use crate::declaration::DeclarationRegistry;
use crate::kernel::component::ComponentId;

pub use error::ResolutionError;
pub use stack::ResolutionStack;

/// One entry of a [`ConstructionPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub id: ComponentId,
    pub load_order: i32,
    pub dependencies: Vec<ComponentId>,
    /// Nesting below the top-level component that pulled this one in.
    pub depth: usize,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (load order {})", self.id, self.load_order)?;
        if !self.dependencies.is_empty() {
            let deps: Vec<&str> = self.dependencies.iter().map(ComponentId::as_str).collect();
            write!(f, " <- {}", deps.join(", "))?;
        }
        Ok(())
    }
}

/// Construction order for every declared component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructionPlan {
    steps: Vec<PlanStep>,
}

impl ConstructionPlan {
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn ids(&self) -> Vec<ComponentId> {
        self.steps.iter().map(|step| step.id.clone()).collect()
    }

    pub fn position(&self, id: &ComponentId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == *id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for ConstructionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>3}. {}{}", index + 1, "  ".repeat(step.depth), step)?;
        }
        Ok(())
    }
}

struct Frame<'a> {
    id: ComponentId,
    dependencies: &'a [ComponentId],
    next: usize,
}

/// Computes construction plans over a [`DeclarationRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    registry: &'a DeclarationRegistry,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a DeclarationRegistry) -> Self {
        Self { registry }
    }

    /// Identities in top-level traversal order: ascending load order, stable
    /// for ties.
    pub fn traversal_seed(&self) -> Vec<ComponentId> {
        let mut seed: Vec<(i32, ComponentId)> = self
            .registry
            .iter()
            .map(|declaration| (declaration.load_order(), declaration.id().clone()))
            .collect();
        seed.sort_by_key(|(load_order, _)| *load_order);
        seed.into_iter().map(|(_, id)| id).collect()
    }

    /// Compute the full construction plan.
    pub fn plan(&self) -> Result<ConstructionPlan, ResolutionError> {
        let mut emitted = HashSet::new();
        let mut steps = Vec::with_capacity(self.registry.len());
        for root in self.traversal_seed() {
            if !emitted.contains(&root) {
                self.visit(root, &mut emitted, &mut steps)?;
            }
        }
        log::debug!(
            "Resolved construction order: {:?}",
            steps.iter().map(|step: &PlanStep| step.id.as_str()).collect::<Vec<_>>()
        );
        Ok(ConstructionPlan { steps })
    }

    /// Plan only `id` and its transitive dependencies.
    pub fn plan_for(&self, id: &ComponentId) -> Result<ConstructionPlan, ResolutionError> {
        let mut emitted = HashSet::new();
        let mut steps = Vec::new();
        self.visit(id.clone(), &mut emitted, &mut steps)?;
        Ok(ConstructionPlan { steps })
    }

    fn visit(
        &self,
        root: ComponentId,
        emitted: &mut HashSet<ComponentId>,
        steps: &mut Vec<PlanStep>,
    ) -> Result<(), ResolutionError> {
        let mut in_flight = ResolutionStack::new();
        let root_dependencies = self.dependencies(&root, None)?;
        in_flight.enter(root.clone())?;
        let mut frames = vec![Frame {
            id: root,
            dependencies: root_dependencies,
            next: 0,
        }];

        loop {
            let Some(frame) = frames.last_mut() else {
                break;
            };
            let next = frame.dependencies.get(frame.next).cloned();
            frame.next += 1;
            let owner = frame.id.clone();

            match next {
                Some(dependency) => {
                    if emitted.contains(&dependency) {
                        continue;
                    }
                    let dependencies = self.dependencies(&dependency, Some(&owner))?;
                    in_flight.enter(dependency.clone())?;
                    log::trace!("Resolving '{}' for '{}'", dependency, owner);
                    frames.push(Frame {
                        id: dependency,
                        dependencies,
                        next: 0,
                    });
                }
                None => {
                    let Some(done) = frames.pop() else {
                        break;
                    };
                    let left = in_flight.leave(&done.id);
                    debug_assert!(left, "'{}' finished while not on top of the resolution stack", done.id);
                    emitted.insert(done.id.clone());
                    steps.push(PlanStep {
                        load_order: self.registry.load_order_of(&done.id).unwrap_or_default(),
                        dependencies: done.dependencies.to_vec(),
                        depth: frames.len(),
                        id: done.id,
                    });
                }
            }
        }
        Ok(())
    }

    fn dependencies(
        &self,
        id: &ComponentId,
        required_by: Option<&ComponentId>,
    ) -> Result<&'a [ComponentId], ResolutionError> {
        self.registry
            .get(id)
            .map(|declaration| declaration.dependencies())
            .ok_or_else(|| ResolutionError::UnknownIdentity {
                id: id.clone(),
                required_by: required_by.cloned(),
            })
    }
}
