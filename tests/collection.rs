//! Public contract of `Collection`, exercised the way callers use it.

use std::fmt::Display;
use std::time::{Duration, Instant};

use collection::{Collection, IndexOutOfRange, collection};

#[test]
fn million_items_add_then_remove() {
    const ITEMS: i32 = 1_000_000;
    let started = Instant::now();

    let mut nums = Collection::new();
    nums.add_range(1..ITEMS + 1);
    assert_eq!(nums.len(), ITEMS as usize);
    assert!(nums.capacity() >= nums.len());

    for i in (0..ITEMS as usize).rev() {
        nums.remove_at(i).unwrap();
    }
    assert_eq!(nums.to_string(), "[]");
    assert!(nums.capacity() >= nums.len());
    assert_eq!(nums.capacity(), Collection::<i32>::MIN_CAPACITY);

    // Generous enough for unoptimized builds; quadratic behaviour would blow well past it.
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn million_single_adds() {
    let mut nums = Collection::new();
    for i in 0..1_000_000u32 {
        nums.add(i);
    }
    assert_eq!(nums.len(), 1_000_000);
    assert!(nums.capacity() >= nums.len());
    assert_eq!(nums[999_999], 999_999);
}

#[test]
fn add_range_with_grow_renders_everything() {
    let mut nums = Collection::new();
    let old_capacity = nums.capacity();
    let items: Vec<i32> = (1000..3000).collect();
    nums.add_range(items.iter().copied());

    let expected = format!(
        "[{}]",
        items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    assert_eq!(nums.to_string(), expected);
    assert!(nums.capacity() >= old_capacity);
    assert!(nums.capacity() >= nums.len());
}

#[test]
fn count_and_capacity_track_each_call() {
    let mut nums = Collection::new();
    for i in 1..=10 {
        nums.add(i);
        assert_eq!(nums.len(), i);
        assert!(nums.capacity() >= nums.len());
    }
    for i in (1..=10).rev() {
        nums.remove_at(i - 1).unwrap();
        assert_eq!(nums.len(), i - 1);
        assert!(nums.capacity() >= nums.len());
    }
}

/// Errors surface through `?` like any other error type.
#[test]
fn errors_propagate_with_question_mark() {
    fn swap_ends<T>(c: &mut Collection<T>) -> Result<(), IndexOutOfRange> {
        let last = c.len().wrapping_sub(1);
        c.exchange(0, last)?;
        Ok(())
    }

    let mut c = collection![1, 2, 3];
    assert_eq!(swap_ends(&mut c), Ok(()));
    assert_eq!(c.to_string(), "[3, 2, 1]");

    let mut empty: Collection<i32> = collection![];
    let err = swap_ends(&mut empty).unwrap_err();
    assert_eq!(err, IndexOutOfRange { index: 0, len: 0 });
    assert_eq!(err.to_string(), "index 0 is out of range for collection of length 0");

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.downcast_ref::<IndexOutOfRange>().is_some());
}

#[test]
fn nested_collections_of_different_types() {
    let names = collection!["Teddy", "Gerry"];
    let nums = collection![10, 20];
    let dates: Collection<u64> = Collection::new();
    let nested: Collection<Box<dyn Display>> = collection![
        Box::new(names) as Box<dyn Display>,
        Box::new(nums),
        Box::new(dates),
    ];
    assert_eq!(nested.to_string(), "[[Teddy, Gerry], [10, 20], []]");
}

#[test]
fn owned_strings() {
    let mut names: Collection<String> = ["George", "Ivan"].iter().map(|s| s.to_string()).collect();
    names[0].push_str("s");
    names.insert_at(1, "Maya".to_owned()).unwrap();
    assert_eq!(names.to_string(), "[Georges, Maya, Ivan]");
    assert_eq!(names.remove_at(2).as_deref(), Ok("Ivan"));
    let collected: Vec<String> = names.into_iter().collect();
    assert_eq!(collected, ["Georges", "Maya"]);
}

#[test]
fn slice_methods_through_deref() {
    let mut c: Collection<i32> = (1..=5).collect();
    assert!(c.contains(&3));
    c.reverse();
    assert_eq!(c.as_slice(), &[5, 4, 3, 2, 1]);
    assert_eq!(c.iter().rev().next(), Some(&1));
}
