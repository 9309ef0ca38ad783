use std::collections::LinkedList;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringdeque::{Deque, DequeError, Number, Value, MIN_CAPACITY};

fn check_capacity<T>(deque: &Deque<T>) {
    let capacity = deque.capacity();
    assert!(capacity.is_power_of_two(), "capacity {}", capacity);
    assert!(capacity >= MIN_CAPACITY);
    // shrinking halves at a quarter, so the buffer is never sparser than 1/8
    if !deque.is_empty() && capacity > MIN_CAPACITY {
        assert!(capacity < 8 * deque.len(), "capacity {} len {}", capacity, deque.len());
    }
}

#[test]
fn random_ends_match_a_linked_list() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut deque = Deque::new();
        let mut model = LinkedList::new();
        for step in 0..2000u32 {
            // bias towards growth early on and towards shrinking later
            let grow = if step < 1000 { 0..6 } else { 0..3 };
            match rng.gen_range(grow) {
                0 => assert_eq!(deque.pop().ok(), model.pop_back()),
                1 => assert_eq!(deque.shift().ok(), model.pop_front()),
                2 | 4 => {
                    deque.push(step);
                    model.push_back(step);
                }
                _ => {
                    deque.unshift(step);
                    model.push_front(step);
                }
            }
            assert_eq!(deque.len(), model.len());
            check_capacity(&deque);
        }
        assert!(deque.iter().eq(model.iter()));
        assert!(deque.iter().rev().eq(model.iter().rev()));
    }
}

#[test]
fn random_positional_edits_match_a_vec() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut deque = Deque::new();
    let mut model: Vec<u32> = Vec::new();
    for step in 0..5000u32 {
        match rng.gen_range(0..5) {
            0 | 1 => {
                let at = rng.gen_range(0..model.len() + 1);
                deque.insert(at, step).unwrap();
                model.insert(at, step);
            }
            2 if !model.is_empty() => {
                let at = rng.gen_range(0..model.len());
                assert_eq!(deque.remove(at).ok(), Some(model.remove(at)));
            }
            3 if !model.is_empty() => {
                let at = rng.gen_range(0..model.len()) as isize;
                let back = at - model.len() as isize;
                assert_eq!(deque.get(back).ok(), Some(&model[at as usize]));
                deque.set(at, step).unwrap();
                model[at as usize] = step;
            }
            _ => {
                let n = rng.gen_range(-20isize..20);
                deque.rotate(n);
                if !model.is_empty() {
                    let n = n.rem_euclid(model.len() as isize) as usize;
                    model.rotate_left(n);
                }
            }
        }
        assert_eq!(deque, model);
        check_capacity(&deque);
    }
}

#[test]
fn pushes_then_pops() {
    for k in 0..70usize {
        for j in 0..k + 1 {
            let mut deque = Deque::new();
            for i in 0..k {
                deque.push(i);
            }
            for _ in 0..j {
                deque.pop().unwrap();
            }
            assert_eq!(deque.len(), k - j);
            check_capacity(&deque);
        }
    }
}

#[test]
fn nine_pushes_seven_pops() {
    let mut deque = Deque::new();
    for i in 0..9 {
        deque.push(i);
    }
    assert_eq!(deque.capacity(), 16);
    for expected in (2..9).rev() {
        assert_eq!(deque.pop().ok(), Some(expected));
    }
    assert_eq!(deque.capacity(), 8);
    assert_eq!(deque, [0, 1]);
}

#[test]
fn rotation_round_trips() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 0..40 {
        let original: Deque<usize> = (0..len).collect();
        for _ in 0..20 {
            let n = rng.gen_range(-100isize..100);
            let mut rotated = original.clone();
            rotated.rotate(n);
            rotated.rotate(-n);
            assert_eq!(rotated, original);
        }
    }
}

#[test]
fn clones_do_not_share() {
    let mut original: Deque<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let mut copy = original.clone();
    copy[0].push('!');
    copy.push("d".to_string());
    original.reverse();
    assert_eq!(original, ["c", "b", "a"]);
    assert_eq!(copy, ["a!", "b", "c", "d"]);
}

#[test]
fn sort_keeps_equal_elements_in_order() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut deque = Deque::new();
    for tag in 0..500 {
        let key = rng.gen_range(0..10);
        if rng.gen::<bool>() {
            deque.push((key, tag));
        } else {
            deque.unshift((key, tag));
        }
    }
    let mut expected: Vec<_> = deque.iter().cloned().collect();
    expected.sort_by_key(|&(key, _)| key);
    deque.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(deque, expected);
}

#[test]
fn slice_join_reduce_merge() {
    let deque: Deque<i32> = vec![1, 2, 3, 4].into();
    assert_eq!(deque.slice(0, Some(deque.len() as isize)), deque.clone());
    for i in 0..4 {
        assert!(deque.slice(i, Some(0)).is_empty());
    }
    assert_eq!(deque.reduce(0, |acc, x| acc + x), 10);

    let three: Deque<i32> = vec![1, 2, 3].into();
    assert_eq!(three.join(","), "1,2,3");
    assert_eq!(Deque::<i32>::new().join(","), "");

    let a: Deque<i32> = vec![1, 2].into();
    let b: Deque<i32> = vec![3, 4].into();
    assert_eq!(a.merge(&b), [1, 2, 3, 4]);
    assert_eq!(a, [1, 2]);
    assert_eq!(b, [3, 4]);
}

#[test]
fn host_values() {
    let mut values: Deque<Value> = vec![Value::from("10"),
                                        Value::from(vec![1, 2]),
                                        Value::Null,
                                        Value::from(-2.5)]
        .into();
    match values.sum() {
        Err(DequeError::NotNumeric { index }) => assert_eq!(index, 1),
        other => panic!("unexpected {:?}", other),
    }
    values.remove(1).unwrap();
    assert_eq!(values.sum().ok(), Some(Number::Float(7.5)));
    assert_eq!(values.join(";"), "10;;-2.5");
    assert!(values.contains(&[Value::Null, Value::from("10")]));
    assert!(!values.contains(&[Value::from(10)]));
    assert_eq!(values.find(&Value::from(-2.5)), Some(2));
    assert!(values.isset(-3, true));
    assert!(!values.isset(1, true));
    assert!(values.isset(1, false));
}
