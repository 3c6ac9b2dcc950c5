use crate::*;

/// Yields 1 through 10 and returns 1000, unless `fail_at` is reached first,
/// in which case it panics with "gulp".
fn counter(fail_at: Option<i32>) -> Coroutine<(), i32, i32> {
    Coroutine::new(move |y: &Yielder<(), i32, i32>, ()| {
        for i in 1..=10 {
            if Some(i) == fail_at {
                panic!("gulp");
            }
            y.suspend(i);
        }
        1000
    })
}

#[test]
fn initial_status() {
    let co = counter(None);
    assert_eq!(co.status(), Status::Suspended);
    assert!(!co.is_started());
    assert!(co.last_error().is_none());
}

#[test]
fn yield_one() {
    let co = counter(None);
    assert_eq!(co.resume(()).unwrap(), Yield(1));
    assert_eq!(co.status(), Status::Suspended);
    assert!(co.is_started());
}

#[test]
fn yield_many() {
    let co = counter(None);
    co.assert_yields((), 1).assert_yields((), 2).assert_yields((), 3);
    assert_eq!(co.status(), Status::Suspended);
}

#[test]
fn yield_all_then_return() {
    let co = counter(None);
    for i in 1..=10 {
        co.assert_yields((), i).assert_status(Status::Suspended);
    }
    co.assert_returns((), 1000).assert_status(Status::Dead);
    assert!(matches!(co.assert_fails(()), CoroError::EndOfCoro));
}

#[test]
fn resume_after_end_keeps_reporting_end() {
    let co = counter(None);
    assert_eq!(co.for_each(|_| {}).unwrap(), 1000);
    for _ in 0..3 {
        assert!(matches!(co.resume(()), Err(CoroError::EndOfCoro)));
        assert_eq!(co.status(), Status::Dead);
    }
    assert!(co.last_error().is_none());
}

#[test]
fn cancel_before_start() {
    let co = counter(None);
    assert!(co.cancel().is_ok());
    assert_eq!(co.status(), Status::Dead);
    assert!(!co.is_started());
    assert!(matches!(co.resume(()), Err(CoroError::EndOfCoro)));
}

#[test]
fn cancel_after_some() {
    let co = counter(None);
    co.assert_yields((), 1).assert_yields((), 2);
    assert!(co.cancel().is_ok());
    assert_eq!(co.status(), Status::Dead);
    assert!(matches!(co.last_error(), Some(CoroError::Cancelled)));
    assert!(matches!(co.resume(()), Err(CoroError::Cancelled)));
}

#[test]
fn cancel_twice() {
    let co = counter(None);
    co.assert_yields((), 1);
    assert!(co.cancel().is_ok());
    assert!(matches!(co.cancel(), Err(CoroError::InvalidState)));
}

#[test]
fn cancel_after_all() {
    let co = counter(None);
    co.collect_yields().unwrap();
    assert!(matches!(co.cancel(), Err(CoroError::InvalidState)));
    assert_eq!(co.status(), Status::Dead);
}

#[test]
fn panic_in_body() {
    let co = counter(Some(3));
    let mut count = 0;
    let err = loop {
        match co.resume(()) {
            Ok(Yield(_)) => count += 1,
            Ok(Return(r)) => panic!("unexpected return {r}"),
            Err(err) => break err,
        }
    };
    assert_eq!(count, 2);
    assert_eq!(err.to_string(), "gulp");
    assert_eq!(co.status(), Status::Dead);
    assert!(matches!(
        co.last_error(),
        Some(CoroError::Panicked { message }) if message == "gulp"
    ));
    // The first fault is reported forever after.
    assert_eq!(co.assert_fails(()).to_string(), "gulp");
}

#[test]
fn panic_before_first_yield() {
    let co = counter(Some(1));
    assert_eq!(co.assert_fails(()).to_string(), "gulp");
    assert_eq!(co.status(), Status::Dead);
}

#[test]
fn status_reads_do_not_change_state() {
    let co = counter(None);
    for _ in 0..5 {
        assert_eq!(co.status(), Status::Suspended);
    }
    co.assert_yields((), 1);
    for _ in 0..5 {
        assert_eq!(co.status(), Status::Suspended);
    }
    co.assert_yields((), 2);
}

#[test]
fn for_each_stops_at_fault() {
    let co = counter(Some(4));
    let mut seen = Vec::new();
    let err = co.for_each(|i| seen.push(i)).unwrap_err();
    assert_eq!(seen, [1, 2, 3]);
    assert_eq!(err.to_string(), "gulp");
}

#[test]
fn iter_sums_yields() {
    let sum: i32 = iter(|y: &Yielder<(), i32, ()>, ()| {
        for i in 1..=10 {
            y.suspend(i);
        }
    })
    .unwrap()
    .sum();
    assert_eq!(sum, 55);
}

#[test]
fn iter_keeps_return_value() {
    let mut it = iter(|y: &Yielder<(), i32, i32>, ()| {
        for i in 1..=10 {
            y.suspend(i);
        }
        1000
    })
    .unwrap();
    let count = it.by_ref().count();
    assert_eq!(count, 10);
    assert_eq!(it.returned(), Some(&1000));
}
