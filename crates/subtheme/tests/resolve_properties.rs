//! Property tests for ancestor-chain resolution: the iterative walk must
//! agree with a straightforward linear scan of the chain for any mix of
//! theme fields.

use proptest::prelude::*;

use subtheme::{
    resolve_partial, resolve_theme, ContentNode, InMemoryNodeStore, NodeId, PARTIAL_NONE,
};

/// One node's partial-theme field.
#[derive(Debug, Clone)]
enum PartialField {
    Unset,
    Stop,
    Theme(String),
}

/// One node's full-theme fields.
#[derive(Debug, Clone)]
struct FullFields {
    applied: Option<String>,
    entity: Option<String>,
}

/// Theme names drawn from a small alphabet that can never spell "none".
fn theme_name() -> impl Strategy<Value = String> {
    "[a-c]{1,6}"
}

fn partial_field() -> impl Strategy<Value = PartialField> {
    prop_oneof![
        3 => Just(PartialField::Unset),
        1 => Just(PartialField::Stop),
        2 => theme_name().prop_map(PartialField::Theme),
    ]
}

fn full_fields() -> impl Strategy<Value = FullFields> {
    (
        proptest::option::weighted(0.3, theme_name()),
        proptest::option::weighted(0.2, theme_name()),
    )
        .prop_map(|(applied, entity)| FullFields { applied, entity })
}

/// Builds a linear chain where node 0 is the leaf and the last node is the
/// root, then resolves from the leaf.
fn chain_store<T>(fields: &[T], build: impl Fn(ContentNode, &T) -> ContentNode) -> InMemoryNodeStore {
    let mut store = InMemoryNodeStore::new();
    let len = fields.len() as u64;
    for (i, field) in fields.iter().enumerate() {
        let i = i as u64;
        let mut node = ContentNode::new(NodeId(i));
        if i + 1 < len {
            node = node.with_parent(NodeId(i + 1));
        }
        store.insert(build(node, field));
    }
    store
}

proptest! {
    #[test]
    fn partial_resolution_matches_linear_scan(
        fields in prop::collection::vec(partial_field(), 1..12)
    ) {
        let store = chain_store(&fields, |node, field| match field {
            PartialField::Unset => node,
            PartialField::Stop => node.with_partial_theme(PARTIAL_NONE),
            PartialField::Theme(name) => node.with_partial_theme(name.clone()),
        });

        // Nearest decisive field wins; the stop sentinel yields nothing.
        let expected = fields.iter().find_map(|field| match field {
            PartialField::Unset => None,
            PartialField::Stop => Some(None),
            PartialField::Theme(name) => Some(Some(name.clone())),
        }).flatten();

        prop_assert_eq!(resolve_partial(&store, NodeId(0)).unwrap(), expected);
    }

    #[test]
    fn full_resolution_matches_linear_scan(
        fields in prop::collection::vec(full_fields(), 1..12)
    ) {
        let store = chain_store(&fields, |node, field| {
            let node = match &field.applied {
                Some(name) => node.with_applied_theme(name.clone()),
                None => node,
            };
            match &field.entity {
                Some(name) => node.with_entity_theme(name.clone()),
                None => node,
            }
        });

        // Per node: applied beats entity; only then does the walk move up.
        let expected = fields
            .iter()
            .find_map(|field| field.applied.clone().or_else(|| field.entity.clone()));

        prop_assert_eq!(resolve_theme(&store, NodeId(0)).unwrap(), expected);
    }

    #[test]
    fn unthemed_chain_resolves_to_nothing(len in 1usize..12) {
        let fields = vec![(); len];
        let store = chain_store(&fields, |node, _| node);

        prop_assert_eq!(resolve_theme(&store, NodeId(0)).unwrap(), None);
        prop_assert_eq!(resolve_partial(&store, NodeId(0)).unwrap(), None);
    }
}
