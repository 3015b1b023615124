mod common;

use common::{Ledger, Tracked, TestAlloc, catch};
use sbovec::SboVec;

#[test]
fn spill_push_with_failing_hook_keeps_inline_contents() {
    let ledger = Ledger::new();
    let alloc: TestAlloc = TestAlloc::new(1);
    let mut v: SboVec<Tracked, 2, TestAlloc> = SboVec::new_in(alloc.clone());
    v.push(ledger.make(1));
    v.push(ledger.make(2));

    alloc.stats.allow_constructs(0);
    assert!(catch(|| v.push(ledger.make(3))).is_err());
    assert!(v.is_inline());
    assert_eq!(v.capacity(), 2);
    assert_eq!(v, [1, 2]);
    assert_eq!(ledger.live(), 2);

    alloc.stats.unlimited_constructs();
    v.push(ledger.make(3));
    assert_eq!(v, [1, 2, 3]);
    drop(v);
    assert_eq!(ledger.live(), 0);
    assert_eq!(alloc.constructs(), 3);
    assert_eq!(alloc.destroys(), 3);
}

#[test]
fn heap_rebuild_with_failing_hook_keeps_old_buffer() {
    let ledger = Ledger::new();
    let alloc: TestAlloc = TestAlloc::new(1);
    let mut v: SboVec<Tracked, 2, TestAlloc> = SboVec::new_in(alloc.clone());
    for i in 0..4 {
        v.push(ledger.make(i));
    }
    assert_eq!(v.capacity(), 4);
    let before = v.as_ptr();

    alloc.stats.allow_constructs(0);
    assert!(catch(|| v.insert(1, ledger.make(9))).is_err());
    assert_eq!(v, [0, 1, 2, 3]);
    assert_eq!(v.capacity(), 4);
    assert_eq!(v.as_ptr(), before);
    assert_eq!(ledger.live(), 4);
}

#[test]
fn inline_insert_from_within_clone_panic() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 8> = ledger.make_all(0..4).into_iter().collect();

    ledger.allow_clones(1);
    assert!(catch(|| v.insert_from_within(1, 0..3)).is_err());
    assert!(v.is_inline());
    assert_eq!(v, [0, 1, 2, 3]);
    assert_eq!(ledger.live(), 4);

    ledger.unlimited_clones();
    v.insert_from_within(1, 0..3);
    assert_eq!(v, [0, 0, 1, 2, 1, 2, 3]);
}

#[test]
fn spilling_slice_insert_clone_panic() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 4> = ledger.make_all(0..4).into_iter().collect();
    let src = ledger.make_all(10..13);

    ledger.allow_clones(2);
    assert!(catch(|| v.insert_from_slice(2, &src)).is_err());
    assert!(v.is_inline());
    assert_eq!(v, [0, 1, 2, 3]);
    assert_eq!(ledger.live(), 7);
}

#[test]
fn copy_construction_clone_panic() {
    let ledger = Ledger::new();
    let heap: SboVec<Tracked, 2> = ledger.make_all(0..5).into_iter().collect();
    let inline: SboVec<Tracked, 8> = ledger.make_all(0..3).into_iter().collect();

    ledger.allow_clones(3);
    assert!(catch(|| heap.clone()).is_err());
    assert_eq!(ledger.live(), 8);

    ledger.allow_clones(1);
    assert!(catch(|| inline.clone()).is_err());
    assert_eq!(ledger.live(), 8);
    assert_eq!(heap, [0, 1, 2, 3, 4]);
    assert_eq!(inline, [0, 1, 2]);
}

#[test]
fn clone_from_clone_panic_leaves_empty_inline() {
    let ledger = Ledger::new();
    let mut target: SboVec<Tracked, 4> = ledger.make_all([100, 101]).into_iter().collect();
    let source: SboVec<Tracked, 4> = ledger.make_all(0..6).into_iter().collect();

    ledger.allow_clones(2);
    assert!(catch(|| target.clone_from(&source)).is_err());
    assert!(target.is_empty());
    assert!(target.is_inline());
    assert_eq!(target.capacity(), 4);
    assert_eq!(ledger.live(), 6);

    ledger.unlimited_clones();
    target.push(ledger.make(7));
    assert_eq!(target, [7]);
    target.clone_from(&source);
    assert_eq!(target, source);
}

#[test]
fn clone_from_drop_panic_leaves_empty_inline() {
    let ledger = Ledger::new();
    let mut target: SboVec<Tracked, 4> = ledger.make_all([0, 1, 2]).into_iter().collect();
    let source: SboVec<Tracked, 4> = ledger.make_all([5]).into_iter().collect();

    ledger.panic_on_drop(1);
    assert!(catch(|| target.clone_from(&source)).is_err());
    assert!(target.is_empty());
    assert!(target.is_inline());
    assert_eq!(ledger.live(), 1);

    target.clone_from(&source);
    assert_eq!(target, [5]);
}

#[test]
fn erase_drop_panic_keeps_survivors() {
    let ledger = Ledger::new();
    let mut inline: SboVec<Tracked, 8> = ledger.make_all(0..6).into_iter().collect();
    ledger.panic_on_drop(2);
    assert!(catch(|| inline.erase(1..4)).is_err());
    assert_eq!(inline, [0, 4, 5]);
    assert_eq!(ledger.live(), 3);

    let mut heap: SboVec<Tracked, 2> = ledger.make_all(0..6).into_iter().collect();
    ledger.panic_on_drop(0);
    assert!(catch(|| heap.erase(..2)).is_err());
    assert_eq!(heap, [2, 3, 4, 5]);
    assert_eq!(ledger.live(), 7);
}

#[test]
fn truncate_drop_panic_keeps_prefix() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 8> = ledger.make_all(0..5).into_iter().collect();
    ledger.panic_on_drop(3);
    assert!(catch(|| v.truncate(1)).is_err());
    assert_eq!(v, [0]);
    assert_eq!(ledger.live(), 1);
}

#[test]
fn resize_clone_panic_is_all_or_nothing() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 4> = ledger.make_all(0..2).into_iter().collect();
    let fill = ledger.make(7);

    ledger.allow_clones(2);
    assert!(catch(|| v.resize(6, fill)).is_err());
    assert!(v.is_inline());
    assert_eq!(v, [0, 1]);
    assert_eq!(ledger.live(), 2);
}

#[test]
fn resize_with_closure_panic() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 4> = ledger.make_all(0..3).into_iter().collect();
    let mut made = 0;
    let r = catch(|| {
        v.resize_with(3 + 2, || {
            made += 1;
            if made == 2 {
                panic!("second fill");
            }
            ledger.make(made)
        })
    });
    assert!(r.is_err());
    assert_eq!(v, [0, 1, 2]);
    assert_eq!(ledger.live(), 3);
}

#[test]
fn emplace_closure_panic_does_not_spill() {
    let ledger = Ledger::new();
    let mut v: SboVec<Tracked, 2> = ledger.make_all(0..2).into_iter().collect();
    assert!(
        catch(|| {
            v.emplace(|| panic!("no value"));
        })
        .is_err()
    );
    assert_eq!(v, [0, 1]);
    assert!(v.is_inline());
    assert_eq!(v.capacity(), 2);
    assert_eq!(ledger.live(), 2);

    v.emplace(|| ledger.make(2));
    assert_eq!(v, [0, 1, 2]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn move_assign_relocation_hook_panic_keeps_the_rest_in_source() {
    type Fixed = TestAlloc<false, false, false>;
    let ledger = Ledger::new();
    let mine = Fixed::new(1);
    let mut a: SboVec<Tracked, 2, Fixed> = SboVec::new_in(mine.clone());
    let mut b = SboVec::<Tracked, 2, Fixed>::from_iter_in(ledger.make_all(1..4), Fixed::new(2));

    mine.stats.allow_constructs(1);
    assert!(catch(|| a.move_assign(&mut b)).is_err());
    assert!(a.is_empty());
    assert!(a.is_inline());
    assert_eq!(b, [3]);
    assert_eq!(ledger.live(), 1);
    assert_eq!(mine.constructs(), 1);
    assert_eq!(mine.destroys(), 1);

    mine.stats.unlimited_constructs();
    a.move_assign(&mut b);
    assert_eq!(a, [3]);
    assert!(b.is_empty());
}

#[test]
fn into_iter_drops_the_rest_through_the_allocator() {
    let ledger = Ledger::new();
    let alloc: TestAlloc = TestAlloc::new(1);
    let v = SboVec::<Tracked, 2, TestAlloc>::from_iter_in(ledger.make_all(0..5), alloc.clone());

    let mut it = v.into_iter();
    let first = it.next();
    let last = it.next_back();
    drop(it);
    assert_eq!(alloc.destroys(), 3);
    assert_eq!(ledger.live(), 2);
    drop((first, last));
    assert_eq!(ledger.live(), 0);
}

#[test]
fn every_path_balances() {
    let ledger = Ledger::new();
    let alloc: TestAlloc = TestAlloc::new(3);
    {
        let mut v: SboVec<Tracked, 3, TestAlloc> = SboVec::new_in(alloc.clone());
        for i in 0..10 {
            v.push(ledger.make(i));
        }
        v.insert(0, ledger.make(-1));
        v.erase(2..5);
        let taken = v.remove(0);
        v.resize(3, taken);
        v.shrink_to_fit();
        assert!(v.is_inline());
        v.extend_from_within(..);
        let mut w = v.clone();
        w.swap(&mut v);
        w.clear();
        let _ = v.pop();
    }
    assert_eq!(ledger.live(), 0);
    assert_eq!(alloc.constructs(), alloc.destroys() + 2);
}
