//! Edge case tests for the layout engine
//!
//! Boundary conditions, malformed-but-typed snapshots and cyclic data.

use lineage::prelude::*;

fn people(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id, id.to_uppercase())).collect()
}

// =============================================================================
// Empty and Sparse Inputs
// =============================================================================

mod sparse_inputs {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let result = lineage::layout(&[], &[]);
        assert_eq!(result, TreeLayout::default());
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"nodes":[],"edges":[]}"#
        );
    }

    #[test]
    fn test_relationships_without_people() {
        let rels = vec![Relationship::parent("r1", "a", "b")];
        let result = lineage::layout(&[], &rels);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unrelated_people_share_the_top_row() {
        let result = lineage::layout(&people(&["a", "b", "c"]), &[]);

        assert_eq!(result.nodes.len(), 3);
        assert!(result.nodes.iter().all(|n| n.generation == 0 && n.position.y == 0.0));
        let xs: Vec<f64> = result.nodes.iter().map(|n| n.position.x).collect();
        assert_eq!(xs, vec![-375.0, -125.0, 125.0]);
    }

    #[test]
    fn test_siblings_only() {
        let rels = vec![Relationship::sibling("r1", "a", "b")];
        let result = lineage::layout(&people(&["a", "b"]), &rels);

        assert_eq!(result.edges.len(), 1);
        assert!(result.nodes.iter().all(|n| n.generation == 0));
    }
}

// =============================================================================
// Malformed References
// =============================================================================

mod references {
    use super::*;

    #[test]
    fn test_dangling_child_produces_no_edge() {
        let rels = vec![
            Relationship::parent("r1", "a", "missing"),
            Relationship::parent("r2", "a", "b"),
        ];
        let result = lineage::layout(&people(&["a", "b"]), &rels);

        assert_eq!(result.nodes.len(), 2);
        let ids: Vec<&str> = result.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["r2"]);
    }

    #[test]
    fn test_dangling_parent_does_not_shift_generations() {
        let rels = vec![Relationship::parent("r1", "missing", "a")];
        let result = lineage::layout(&people(&["a"]), &rels);

        assert_eq!(result.nodes[0].generation, 0);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_duplicate_relationships_each_produce_an_edge() {
        let rels = vec![
            Relationship::parent("r1", "a", "b"),
            Relationship::parent("r2", "a", "b"),
            Relationship::parent("r2", "a", "b"),
        ];
        let result = lineage::layout(&people(&["a", "b"]), &rels);

        assert_eq!(result.edges.len(), 3);
        assert_eq!(result.node("b").map(|n| n.generation), Some(1));
    }

    #[test]
    fn test_repeated_person_id_appears_once() {
        let people = vec![Person::new("a", "First"), Person::new("a", "Second")];
        let result = lineage::layout(&people, &[]);

        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].data.full_name, "First");
    }

    #[test]
    fn test_unknown_type_is_styled_as_parent() {
        let input = r#"{
            "people": [{"id": "a", "fullName": "A"}, {"id": "b", "fullName": "B"}],
            "relationships": [{"id": "r1", "fromId": "a", "toId": "b", "type": "godparent"}]
        }"#;
        let db = lineage::parse(input).unwrap();
        let result = FamilyTreeLayout::new().layout(&db);

        assert_eq!(result.edges[0].data.kind, RelationshipKind::Unknown);
        assert_eq!(result.edges[0].category(), EdgeCategory::Parent);
        // Unknown kinds do not move anyone down a row
        assert!(result.nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn test_self_parent_link() {
        let rels = vec![
            Relationship::parent("r1", "root", "a"),
            Relationship::parent("r2", "a", "a"),
        ];
        let result = lineage::layout(&people(&["root", "a"]), &rels);

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.node("a").map(|n| n.generation), Some(1));
    }
}

// =============================================================================
// Cyclic Data
// =============================================================================

mod cycles {
    use super::*;

    #[test]
    fn test_fully_cyclic_uses_input_order() {
        let rels = vec![
            Relationship::parent("r1", "a", "b"),
            Relationship::parent("r2", "b", "c"),
            Relationship::parent("r3", "c", "a"),
        ];
        let people = people(&["a", "b", "c"]);
        let layout = FamilyTreeLayout::new();

        let generations = layout.generations(&people, &rels);
        assert_eq!(generations.outcome(), AssignmentOutcome::InputOrderFallback);
        assert_eq!(generations.get("a"), Some(0));
        assert_eq!(generations.get("b"), Some(1));
        assert_eq!(generations.get("c"), Some(2));

        let result = layout.compute(&people, &rels);
        let ys: Vec<f64> = result.nodes.iter().map(|n| n.position.y).collect();
        assert_eq!(ys, vec![0.0, 200.0, 400.0]);
    }

    #[test]
    fn test_fallback_rows_are_packed() {
        // Two people in a cycle plus a third with parents in it: generations
        // are 0, 1, 2 and rows stay 200 apart
        let rels = vec![
            Relationship::parent("r1", "a", "b"),
            Relationship::parent("r2", "b", "a"),
            Relationship::parent("r3", "a", "c"),
        ];
        let result = lineage::layout(&people(&["a", "b", "c"]), &rels);

        let max_y = result.nodes.iter().map(|n| n.position.y).fold(0.0, f64::max);
        assert_eq!(max_y, 400.0);
    }

    #[test]
    fn test_cycle_below_a_root() {
        let rels = vec![
            Relationship::parent("r1", "root", "a"),
            Relationship::parent("r2", "a", "b"),
            Relationship::parent("r3", "b", "a"),
        ];
        let generations = FamilyTreeLayout::new().generations(&people(&["root", "a", "b"]), &rels);

        assert_eq!(generations.outcome(), AssignmentOutcome::Propagated);
        assert_eq!(generations.get("root"), Some(0));
        assert_eq!(generations.get("a"), Some(1));
        assert_eq!(generations.get("b"), Some(2));
    }

    #[test]
    fn test_dense_cycles_terminate() {
        // Every non-root person is a parent of every other one
        let count = 40;
        let mut people = vec![Person::new("root", "Root")];
        people.extend((0..count).map(|i| Person::new(format!("p{}", i), format!("P {}", i))));

        let mut rels = vec![Relationship::parent("top", "root", "p0")];
        for i in 0..count {
            for j in 0..count {
                if i != j {
                    rels.push(Relationship::parent(
                        format!("r{}_{}", i, j),
                        format!("p{}", i),
                        format!("p{}", j),
                    ));
                }
            }
        }

        let config = LayoutConfig::default().with_max_relaxation_factor(1);
        let layout = FamilyTreeLayout::with_config(config.clone());

        let generations = layout.generations(&people, &rels);
        assert_eq!(generations.outcome(), AssignmentOutcome::Propagated);
        assert!(generations.relaxation_steps() <= config.step_cap(people.len()));
        assert_eq!(generations.get("p0"), Some(1));
        assert_eq!(generations.get("p39"), Some(2));

        let result = layout.compute(&people, &rels);
        assert_eq!(result.nodes.len(), count + 1);
        assert_eq!(result.edges.len(), rels.len());
    }

    #[test]
    fn test_unrooted_cycle_does_not_lift_rooted_line() {
        // x <-> y is reachable from no root and also parents d
        let people = people(&["a", "b", "c", "d", "x", "y"]);
        let rels = vec![
            Relationship::parent("r1", "a", "b"),
            Relationship::parent("r2", "b", "c"),
            Relationship::parent("r3", "c", "d"),
            Relationship::parent("r4", "x", "y"),
            Relationship::parent("r5", "y", "x"),
            Relationship::parent("r6", "x", "d"),
        ];
        let generations = FamilyTreeLayout::new().generations(&people, &rels);

        assert_eq!(generations.outcome(), AssignmentOutcome::Propagated);
        // every parent edge outside the cycle still points downwards
        for rel in rels.iter().filter(|r| r.id != "r4" && r.id != "r5") {
            assert!(
                generations.get(&rel.from_id) < generations.get(&rel.to_id),
                "{} -> {}",
                rel.from_id,
                rel.to_id
            );
        }
        assert_eq!(generations.get("d"), Some(3));
    }
}

// =============================================================================
// Determinism
// =============================================================================

mod determinism {
    use super::*;

    #[test]
    fn test_repeated_calls_are_byte_identical() {
        let people = people(&["a", "b", "c", "d", "e"]);
        let rels = vec![
            Relationship::spouse("r1", "a", "b"),
            Relationship::parent("r2", "a", "c"),
            Relationship::parent("r3", "b", "d"),
            Relationship::spouse("r4", "c", "e"),
            Relationship::sibling("r5", "c", "d"),
        ];

        let first = serde_json::to_string(&lineage::layout(&people, &rels)).unwrap();
        let second = serde_json::to_string(&lineage::layout(&people, &rels)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let people = people(&["a", "b", "c"]);
        let rels = vec![
            Relationship::parent("r1", "a", "b"),
            Relationship::parent("r2", "b", "c"),
        ];
        let layout = FamilyTreeLayout::new();
        let expected = layout.compute(&people, &rels);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| layout.compute(&people, &rels)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
