// Registry Contract Tests
//
// These tests pin down invariants consumers depend on, independent of how
// resolution is implemented internally.

use ptype_core::{ProjectTypeDefinition, ProjectTypeRegistry, RegistryError, BASE_TYPE_ID};

/// Mixed batch: valid chains, a diamond conflict, a cycle, bad ids, a duplicate
fn mixed_batch() -> Vec<ProjectTypeDefinition> {
    let mut defs = Vec::new();

    let mut parent = ProjectTypeDefinition::new("parent", "Parent", true, false);
    parent.add_constant("parent_const", "Parent", "p");
    defs.push(parent);

    let mut parent2 = ProjectTypeDefinition::new("parent2", "Parent 2", true, false);
    parent2.add_constant("parent2_const", "Parent 2", "p2");
    defs.push(parent2);

    let mut clash = ProjectTypeDefinition::new("clash", "Clash", false, true);
    clash.add_constant("parent_const", "Clash", "x");
    defs.push(clash);

    let mut child = ProjectTypeDefinition::new("child", "Child", true, false);
    child.add_parent("parent").add_parent("parent2");
    defs.push(child);

    let mut child2 = ProjectTypeDefinition::new("child2", "Child 2", true, false);
    child2.add_parent("child");
    defs.push(child2);

    let mut diamond = ProjectTypeDefinition::new("diamond", "Diamond", true, false);
    diamond.add_parent("parent").add_parent("clash");
    defs.push(diamond);

    let mut cycle_a = ProjectTypeDefinition::new("cycle_a", "A", true, false);
    cycle_a.add_parent("cycle_b");
    defs.push(cycle_a);

    let mut cycle_b = ProjectTypeDefinition::new("cycle_b", "B", true, false);
    cycle_b.add_parent("cycle_a");
    defs.push(cycle_b);

    defs.push(ProjectTypeDefinition::new("bad id", "Bad", true, false));
    defs.push(ProjectTypeDefinition::new("twin", "Twin 1", true, false));
    defs.push(ProjectTypeDefinition::new("twin", "Twin 2", true, false));

    defs
}

/// WHY: Every project must be able to fall back to the base type
/// BREAKS: Consumers that assume "blank" always resolves
#[test]
fn base_type_is_always_present_and_empty() {
    for registry in [ProjectTypeRegistry::default(), ProjectTypeRegistry::new(mixed_batch())] {
        let base = registry.get_project_type(BASE_TYPE_ID).unwrap();
        assert!(base.ancestors().is_empty());
        assert!(base.attributes().is_empty());
        assert!(base.parents().is_empty());

        let bases = registry
            .project_types()
            .iter()
            .filter(|t| t.id() == BASE_TYPE_ID)
            .count();
        assert_eq!(bases, 1);
    }
}

/// WHY: The base type is an ancestor of every other type
/// BREAKS: is_type_of("blank") checks used as "any project" filters
#[test]
fn every_type_descends_from_base() {
    let registry = ProjectTypeRegistry::new(mixed_batch());

    for project_type in registry.project_types() {
        if project_type.id() != BASE_TYPE_ID {
            assert!(
                project_type.ancestors().contains(BASE_TYPE_ID),
                "{} does not descend from base",
                project_type.id()
            );
        }
    }
}

/// WHY: Ancestors are the transitive closure of declared parents
/// BREAKS: Attribute inheritance and ancestry checks on deep hierarchies
#[test]
fn ancestors_cover_parents_and_their_ancestors() {
    let registry = ProjectTypeRegistry::new(mixed_batch());

    for project_type in registry.project_types() {
        assert!(!project_type.ancestors().contains(project_type.id()));

        for parent_id in project_type.parents() {
            let parent = registry.get_project_type(parent_id).unwrap();
            assert!(project_type.ancestors().contains(parent_id));
            assert!(project_type.ancestors().is_superset(parent.ancestors()));
        }
    }
}

/// WHY: An attribute name has exactly one owner in any resolved type
/// BREAKS: Attribute values becoming ambiguous in projects of that type
#[test]
fn effective_attributes_come_from_self_or_ancestors_without_overlap() {
    let registry = ProjectTypeRegistry::new(mixed_batch());

    for project_type in registry.project_types() {
        let mut expected = 0;
        expected += project_type.definition().own_attributes().len();
        for ancestor in project_type.ancestors() {
            expected += registry
                .get_project_type(ancestor)
                .unwrap()
                .definition()
                .own_attributes()
                .len();
        }
        assert_eq!(project_type.attributes().len(), expected, "{}", project_type.id());

        for attribute in project_type.attributes().values() {
            assert!(project_type.is_type_of(attribute.project_type()));
        }
    }
}

/// WHY: One bad contributor must not take the others down
/// BREAKS: Startup of every host that loads third-party project types
#[test]
fn invalid_contributions_only_affect_membership() {
    let registry = ProjectTypeRegistry::new(mixed_batch());

    for id in ["parent", "parent2", "clash", "child", "child2", BASE_TYPE_ID] {
        assert!(registry.contains(id), "{} should resolve", id);
    }
    for id in ["diamond", "cycle_a", "cycle_b", "bad id", "twin"] {
        assert!(!registry.contains(id), "{} should be excluded", id);
    }
    assert_eq!(registry.len(), 6);
}

/// WHY: Absence is signalled one way only
/// BREAKS: Callers that distinguish "unknown" from "excluded"
#[test]
fn lookup_of_absent_id_is_always_not_found() {
    let registry = ProjectTypeRegistry::new(mixed_batch());

    for id in ["diamond", "cycle_a", "bad id", "twin", "never-declared", ""] {
        match registry.get_project_type(id) {
            Err(RegistryError::NotFound(missing)) => assert_eq!(missing, id),
            other => panic!("Expected NotFound for {:?}, got {:?}", id, other),
        }
    }
}

/// WHY: Definitions arrive from an unordered set of contributors
/// BREAKS: Reproducible registries across restarts
#[test]
fn resolution_is_independent_of_input_order() {
    let forward = ProjectTypeRegistry::new(mixed_batch());

    let mut reversed_batch = mixed_batch();
    reversed_batch.reverse();
    let reversed = ProjectTypeRegistry::new(reversed_batch);

    let mut rotated_batch = mixed_batch();
    rotated_batch.rotate_left(4);
    let rotated = ProjectTypeRegistry::new(rotated_batch);

    for other in [&reversed, &rotated] {
        assert_eq!(forward.project_types(), other.project_types());
        assert_eq!(forward.exclusions(), other.exclusions());
    }
}

/// WHY: isTypeOf must behave like a partial order
/// BREAKS: Type filters in the service layer
#[test]
fn is_type_of_is_reflexive_and_transitive() {
    let registry = ProjectTypeRegistry::new(mixed_batch());
    let types = registry.project_types();

    for a in &types {
        assert!(a.is_type_of(a.id()));
        for b in &types {
            for c in &types {
                if a.is_type_of(b.id()) && b.is_type_of(c.id()) {
                    assert!(a.is_type_of(c.id()), "{} -> {} -> {}", a.id(), b.id(), c.id());
                }
            }
        }
    }
}
