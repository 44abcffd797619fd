use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wbt_collections::{Error, NodeId, WBTreeLinkedList};

#[derive(Debug, Clone)]
enum LinkedOp {
    PushFront(u16),
    PushBack(u16),
    AddBefore(usize, u16),
    AddAfter(usize, u16),
    Remove(usize),
    PopFront,
    PopBack,
}

fn linked_op_strategy() -> impl Strategy<Value = LinkedOp> {
    prop_oneof![
        2 => any::<u16>().prop_map(LinkedOp::PushFront),
        2 => any::<u16>().prop_map(LinkedOp::PushBack),
        3 => (any::<usize>(), any::<u16>()).prop_map(|(pick, v)| LinkedOp::AddBefore(pick, v)),
        3 => (any::<usize>(), any::<u16>()).prop_map(|(pick, v)| LinkedOp::AddAfter(pick, v)),
        3 => any::<usize>().prop_map(LinkedOp::Remove),
        1 => Just(LinkedOp::PopFront),
        1 => Just(LinkedOp::PopBack),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// The model keeps `(id, value)` pairs in list order. Ids of removed nodes are kept
    /// in a graveyard and must be rejected from then on.
    #[test]
    fn linked_ops_match_vec_model(ops in proptest::collection::vec(linked_op_strategy(), 1_500)) {
        let mut list = WBTreeLinkedList::new();
        let mut model: Vec<(NodeId, u16)> = Vec::new();
        let mut graveyard: Vec<NodeId> = Vec::new();

        for op in ops {
            match op {
                LinkedOp::PushFront(v) => {
                    let id = list.push_front(v);
                    model.insert(0, (id, v));
                }
                LinkedOp::PushBack(v) => {
                    let id = list.push_back(v);
                    model.push((id, v));
                }
                LinkedOp::AddBefore(_, v) | LinkedOp::AddAfter(_, v) if model.is_empty() => {
                    model.push((list.push_back(v), v));
                }
                LinkedOp::AddBefore(pick, v) => {
                    let at = pick % model.len();
                    let id = list.add_before(model[at].0, v).unwrap();
                    model.insert(at, (id, v));
                }
                LinkedOp::AddAfter(pick, v) => {
                    let at = pick % model.len();
                    let id = list.add_after(model[at].0, v).unwrap();
                    model.insert(at + 1, (id, v));
                }
                LinkedOp::Remove(pick) => {
                    if model.is_empty() {
                        if let Some(&dead) = graveyard.last() {
                            prop_assert_eq!(list.remove(dead), Err(Error::InvalidNode));
                        }
                    } else {
                        let (id, v) = model.remove(pick % model.len());
                        prop_assert_eq!(list.remove(id), Ok(v));
                        graveyard.push(id);
                    }
                }
                LinkedOp::PopFront => {
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    graveyard.extend(expected.map(|(id, _)| id));
                    prop_assert_eq!(list.pop_front(), expected.map(|(_, v)| v));
                }
                LinkedOp::PopBack => {
                    let expected = model.pop();
                    graveyard.extend(expected.map(|(id, _)| id));
                    prop_assert_eq!(list.pop_back(), expected.map(|(_, v)| v));
                }
            }
        }

        prop_assert!(list.iter().eq(model.iter().map(|(_, v)| v)));
        for (index, &(id, v)) in model.iter().enumerate() {
            prop_assert_eq!(list.index_of(id), Ok(index));
            prop_assert_eq!(list.get(id), Some(&v));
        }
        for &dead in &graveyard {
            prop_assert!(list.node(dead).is_none());
            prop_assert_eq!(list.add_after(dead, 0), Err(Error::InvalidNode));
        }
    }
}

#[test]
fn edits_relative_to_nodes() {
    let mut list = WBTreeLinkedList::new();
    let b = list.push_back('b');
    list.push_front('a');
    let d = list.push_back('d');
    let c = list.add_before(d, 'c').unwrap();
    list.add_after(d, 'e').unwrap();

    assert_eq!(list.iter().copied().collect::<String>(), "abcde");
    assert_eq!(list.index_of(c), Ok(2));
    assert_eq!(list.node(b).and_then(|node| node.next()).map(|node| node.id()), Some(c));

    assert_eq!(list.remove(b), Ok('b'));
    assert_eq!(list.remove(b), Err(Error::InvalidNode));
    assert_eq!(list.index_of(c), Ok(1));
    assert_eq!(list.front().map(|node| *node.item()), Some('a'));
    assert_eq!(list.back().map(|node| *node.item()), Some('e'));
}

#[test]
fn initialize_expires_earlier_ids() {
    let mut list = WBTreeLinkedList::from([1, 2, 3]);
    let two = list.get_at(1).unwrap().id();
    list.initialize([7, 8, 9]);
    assert_eq!(list.get(two), None);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [7, 8, 9]);
}

#[test]
fn ids_from_a_clone_resolve_to_the_copy() {
    let mut list = WBTreeLinkedList::new();
    let x = list.push_back(String::from("x"));
    let mut copy = list.clone();
    if let Some(value) = copy.get_mut(x) {
        value.push('!');
    }
    assert_eq!(list.get(x).map(String::as_str), Some("x"));
    assert_eq!(copy.get(x).map(String::as_str), Some("x!"));
    assert_ne!(list, copy);
}

#[test]
fn ids_from_another_list_are_rejected() {
    let mut a = WBTreeLinkedList::new();
    let mut b = WBTreeLinkedList::new();
    let id = a.push_back('a');
    b.push_back('y');

    assert_eq!(b.remove(id), Err(Error::InvalidNode));
    assert_eq!(b.add_before(id, 'x'), Err(Error::InvalidNode));
    assert_eq!(b.add_after(id, 'z'), Err(Error::InvalidNode));
    assert_eq!(b.index_of(id), Err(Error::InvalidNode));
    assert_eq!(b.get(id), None);
    assert_eq!(b.iter().copied().collect::<String>(), "y");
    assert_eq!(a.remove(id), Ok('a'));
}
