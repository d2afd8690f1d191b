use ordered_tree::OrderedTree;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same elements in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut OrderedTree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
            }
            Op::Remove(k) => match bst.remove(k) {
                Ok(removed) => assert_eq!(removed, set.remove(k)),
                Err(_) => assert!(set.is_empty()),
            },
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    set.iter().all(|x| tree.contains(x)) && tree.number_of_nodes() == set.len()
}

#[quickcheck]
fn in_order_is_strictly_increasing(ops: Vec<Op<i16>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    let sorted = tree.in_order();
    sorted.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn second_insert_is_rejected(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }
    tree.insert(x);
    let nodes = tree.number_of_nodes();

    !tree.insert(x) && tree.number_of_nodes() == nodes
}

#[quickcheck]
fn insert_remove_round_trip(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = OrderedTree::new();
    for y in xs.iter().filter(|y| **y != x) {
        tree.insert(*y);
    }
    let nodes = tree.number_of_nodes();

    tree.insert(x)
        && tree.contains(&x)
        && tree.remove(&x) == Ok(true)
        && !tree.contains(&x)
        && tree.number_of_nodes() == nodes
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        // Removing from an emptied tree is an error, not a miss.
        if tree.is_empty() {
            assert!(tree.remove(delete).is_err());
        } else {
            tree.remove(delete).expect("tree is not empty");
        }
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(x)) && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn leaves_plus_full_nodes_bounded_by_nodes(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }
    if tree.is_empty() {
        return true;
    }

    let leaves = tree.number_of_leaves();
    let full = tree.number_of_full_nodes();
    let nodes = tree.number_of_nodes();
    // Every non-empty binary tree has one more leaf than it has full nodes.
    leaves + full <= nodes && leaves == full + 1
}

#[quickcheck]
fn remove_leaves_takes_exactly_the_leaves(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let nodes = tree.number_of_nodes();
    let leaves = tree.number_of_leaves();

    let pruned = tree.remove_leaves();
    pruned.len() == leaves
        && tree.number_of_nodes() == nodes - leaves
        && pruned.windows(2).all(|pair| pair[0] < pair[1])
        && pruned.iter().all(|x| !tree.contains(x))
}

#[quickcheck]
fn level_order_visits_every_element(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let mut level = tree.level_order();
    let in_order = tree.in_order();
    level.sort();
    level == in_order && tree.level_order().first().copied() == xs.first()
}

#[quickcheck]
fn min_and_max_match_model(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }

    match (xs.iter().min(), xs.iter().max()) {
        (Some(min), Some(max)) => tree.find_min() == Ok(min) && tree.find_max() == Ok(max),
        _ => tree.find_min().is_err() && tree.find_max().is_err(),
    }
}
