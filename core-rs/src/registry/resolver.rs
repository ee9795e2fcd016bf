//! Type graph resolution
//!
//! Turns an unordered batch of definitions into the maximal valid subset:
//!
//! 1. Drop definitions with a missing or malformed id, the reserved base id,
//!    or an id declared more than once.
//! 2. Walk the parent graph depth-first so parents are resolved before
//!    children. A definition on an ancestor cycle, or with any parent that
//!    did not resolve, is dropped; dependants cascade automatically.
//! 3. Ancestors = declared parents plus each parent's ancestors.
//! 4. Attributes from self and every ancestor are merged. An attribute name
//!    contributed by two sources drops the whole definition.
//!
//! Nothing here returns an error. Drops are recorded as [`Exclusion`]s.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

use super::diagnostics::{Exclusion, ExclusionReason};
use super::resolved::ResolvedProjectType;
use super::ProjectTypeRegistry;
use crate::types::{AttributeDefinition, ProjectTypeDefinition, BASE_TYPE_ID};

static TYPE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("type id pattern is valid"));

/// Check a project type id against the identifier alphabet
///
/// # Examples
///
/// ```
/// use ptype_core::registry::is_valid_type_id;
///
/// assert!(is_valid_type_id("maven"));
/// assert!(is_valid_type_id("node-js_2.x"));
/// assert!(!is_valid_type_id(""));
/// assert!(!is_valid_type_id("invalid id"));
/// ```
#[must_use]
pub fn is_valid_type_id(id: &str) -> bool {
    TYPE_ID_PATTERN.is_match(id)
}

/// Collects definitions and resolves them once into a registry
#[derive(Debug, Default)]
pub struct TypeGraphResolver {
    definitions: Vec<ProjectTypeDefinition>,
}

impl TypeGraphResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ProjectTypeDefinition) -> &mut Self {
        self.definitions.push(definition);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve the collected definitions. Never fails; see
    /// [`ProjectTypeRegistry::exclusions`] for what was dropped.
    pub fn resolve(self) -> ProjectTypeRegistry {
        let mut exclusions = Vec::new();
        let candidates = self.candidates(&mut exclusions);

        let mut resolution = Resolution::new(&candidates);
        for id in candidates.keys() {
            resolution.visit(*id);
        }

        let Resolution { resolved, exclusions: graph_exclusions, .. } = resolution;
        exclusions.extend(graph_exclusions);
        exclusions.sort_by(|a, b| {
            a.type_id
                .cmp(&b.type_id)
                .then_with(|| a.reason.to_string().cmp(&b.reason.to_string()))
        });

        tracing::info!(
            submitted = self.definitions.len(),
            resolved = resolved.len(),
            excluded = exclusions.len(),
            "Project type registry resolved"
        );

        ProjectTypeRegistry::from_parts(resolved, exclusions)
    }

    /// Steps 1 and 2: identifier filter, reserved base id, duplicate ids
    fn candidates<'a>(&'a self, exclusions: &mut Vec<Exclusion>) -> BTreeMap<&'a str, &'a ProjectTypeDefinition> {
        let mut by_id: BTreeMap<&str, Vec<&ProjectTypeDefinition>> = BTreeMap::new();

        for definition in &self.definitions {
            match definition.id() {
                Some(BASE_TYPE_ID) => {
                    exclusions.push(Exclusion::new(Some(BASE_TYPE_ID), ExclusionReason::ReservedIdentifier));
                }
                Some(id) if is_valid_type_id(id) => by_id.entry(id).or_default().push(definition),
                other => exclusions.push(Exclusion::new(other, ExclusionReason::InvalidIdentifier)),
            }
        }

        let mut candidates = BTreeMap::new();
        for (id, definitions) in by_id {
            match definitions.as_slice() {
                [single] => {
                    candidates.insert(id, *single);
                }
                many => exclusions.push(Exclusion::new(
                    Some(id),
                    ExclusionReason::DuplicateIdentifier { count: many.len() },
                )),
            }
        }
        candidates
    }
}

impl FromIterator<ProjectTypeDefinition> for TypeGraphResolver {
    fn from_iter<I: IntoIterator<Item = ProjectTypeDefinition>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

impl Extend<ProjectTypeDefinition> for TypeGraphResolver {
    fn extend<I: IntoIterator<Item = ProjectTypeDefinition>>(&mut self, iter: I) {
        self.definitions.extend(iter);
    }
}

/// Working state of one resolution pass
struct Resolution<'a> {
    candidates: &'a BTreeMap<&'a str, &'a ProjectTypeDefinition>,
    resolved: BTreeMap<String, ResolvedProjectType>,
    failed: BTreeSet<&'a str>,
    path: Vec<&'a str>,
    cycles: BTreeMap<&'a str, Vec<String>>,
    exclusions: Vec<Exclusion>,
}

/// A type whose parents are still being walked
struct Frame<'a> {
    id: &'a str,
    definition: &'a ProjectTypeDefinition,
    next: usize,
    seen: BTreeSet<&'a str>,
    unresolved: Option<&'a str>,
}

impl<'a> Frame<'a> {
    fn new(id: &'a str, definition: &'a ProjectTypeDefinition) -> Self {
        Self {
            id,
            definition,
            next: 0,
            seen: BTreeSet::new(),
            unresolved: None,
        }
    }

    /// Next declared parent not yet visited from this frame
    fn next_parent(&mut self) -> Option<&'a str> {
        let parents = self.definition.parents();
        while let Some(parent) = parents.get(self.next) {
            self.next += 1;
            if self.seen.insert(parent.as_str()) {
                return Some(parent.as_str());
            }
        }
        None
    }

    /// Remember the first parent that did not resolve
    fn fail(&mut self, parent: &'a str) {
        if self.unresolved.is_none() {
            self.unresolved = Some(parent);
        }
    }
}

enum Entered<'a> {
    Done(bool),
    Open(Frame<'a>),
}

impl<'a> Resolution<'a> {
    fn new(candidates: &'a BTreeMap<&'a str, &'a ProjectTypeDefinition>) -> Self {
        let mut resolved = BTreeMap::new();
        resolved.insert(
            BASE_TYPE_ID.to_string(),
            ResolvedProjectType::new(ProjectTypeDefinition::base(), BTreeSet::new(), BTreeMap::new()),
        );

        Self {
            candidates,
            resolved,
            failed: BTreeSet::new(),
            path: Vec::new(),
            cycles: BTreeMap::new(),
            exclusions: Vec::new(),
        }
    }

    /// Resolve `id` and everything it depends on. Returns whether `id` ended
    /// up in the registry.
    ///
    /// The walk keeps its own frame stack, so chain depth is bounded by the
    /// heap rather than the thread stack.
    fn visit(&mut self, id: &'a str) -> bool {
        let mut frames: Vec<Frame<'a>> = match self.enter(id) {
            Entered::Done(resolved) => return resolved,
            Entered::Open(frame) => vec![frame],
        };

        loop {
            let Some(top) = frames.last_mut() else {
                return false;
            };

            if let Some(parent) = top.next_parent() {
                match self.enter(parent) {
                    Entered::Done(true) => {}
                    Entered::Done(false) => top.fail(parent),
                    Entered::Open(frame) => frames.push(frame),
                }
                continue;
            }

            let Some(frame) = frames.pop() else {
                return false;
            };
            self.path.pop();
            let resolved = self.finish(frame.id, frame.definition, frame.unresolved);

            match frames.last_mut() {
                Some(dependant) if !resolved => dependant.fail(frame.id),
                Some(_) => {}
                None => return resolved,
            }
        }
    }

    /// Either settle `id` immediately or open a frame for it and push it on
    /// the path.
    fn enter(&mut self, id: &'a str) -> Entered<'a> {
        if self.resolved.contains_key(id) {
            return Entered::Done(true);
        }
        if self.failed.contains(id) {
            return Entered::Done(false);
        }

        // Back edge: every type on the path from `id` onwards is on the cycle
        if let Some(start) = self.path.iter().position(|on_path| *on_path == id) {
            let cycle: Vec<String> = self.path[start..].iter().map(|s| s.to_string()).collect();
            for member in &self.path[start..] {
                self.cycles.entry(*member).or_insert_with(|| cycle.clone());
            }
            return Entered::Done(false);
        }

        let Some(definition) = self.candidates.get(id).copied() else {
            return Entered::Done(false);
        };

        self.path.push(id);
        Entered::Open(Frame::new(id, definition))
    }

    /// Settle a type once all of its parents have been visited
    fn finish(&mut self, id: &'a str, definition: &'a ProjectTypeDefinition, unresolved: Option<&'a str>) -> bool {
        if let Some(cycle) = self.cycles.get(id).cloned() {
            return self.exclude(id, ExclusionReason::AncestorCycle { cycle });
        }
        if let Some(parent) = unresolved {
            return self.exclude(
                id,
                ExclusionReason::UnresolvedParent {
                    parent: parent.to_string(),
                },
            );
        }

        match self.merge(definition) {
            Ok(resolved) => {
                tracing::debug!(
                    type_id = %id,
                    ancestors = resolved.ancestors().len(),
                    attributes = resolved.attributes().len(),
                    "Project type resolved"
                );
                self.resolved.insert(id.to_string(), resolved);
                true
            }
            Err(reason) => self.exclude(id, reason),
        }
    }

    fn exclude(&mut self, id: &'a str, reason: ExclusionReason) -> bool {
        self.failed.insert(id);
        self.exclusions.push(Exclusion::new(Some(id), reason));
        false
    }

    /// Ancestor closure and attribute merge for a type whose parents all resolved
    fn merge(&self, definition: &ProjectTypeDefinition) -> Result<ResolvedProjectType, ExclusionReason> {
        let mut ancestors = BTreeSet::new();
        for parent in definition.parents() {
            if let Some(resolved_parent) = self.resolved.get(parent) {
                ancestors.insert(parent.clone());
                ancestors.extend(resolved_parent.ancestors().iter().cloned());
            }
        }

        let mut attributes: BTreeMap<String, AttributeDefinition> = definition.own_attributes().clone();
        for ancestor in &ancestors {
            let Some(source) = self.resolved.get(ancestor) else {
                continue;
            };
            for (name, attribute) in source.definition().own_attributes() {
                if let Some(existing) = attributes.get(name) {
                    return Err(ExclusionReason::AttributeConflict {
                        attribute: name.clone(),
                        first: existing.project_type().to_string(),
                        second: ancestor.clone(),
                    });
                }
                attributes.insert(name.clone(), attribute.clone());
            }
        }

        Ok(ResolvedProjectType::new(definition.clone(), ancestors, attributes))
    }
}
