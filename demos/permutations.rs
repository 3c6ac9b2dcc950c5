// Generates every permutation of a list from inside a recursive function.
//
// The recursion suspends from arbitrarily deep in its own call stack, which
// is what a thread-backed body allows and a hand-written state machine
// makes awkward. The permutations come out through `iter()`.

use threadcoro::Iter;
use threadcoro::Yielder;
use threadcoro::iter;

fn permute<T: Clone>(y: &Yielder<(), Vec<T>, ()>, items: &mut [T], n: usize) {
    if n <= 1 {
        y.suspend(items.to_vec());
        return;
    }
    for i in 0..n {
        items.swap(i, n - 1);
        permute(y, items, n - 1);
        items.swap(i, n - 1);
    }
}

fn permutations<T>(mut items: Vec<T>) -> Iter<Vec<T>, ()>
where
    T: Clone + Send + 'static,
{
    let spawned = iter(move |y: &Yielder<(), Vec<T>, ()>, ()| {
        let n = items.len();
        permute(y, &mut items, n);
    });
    match spawned {
        Ok(it) => it,
        Err(err) => panic!("can't start the generator: {err}"),
    }
}

fn main() {
    for p in permutations(vec!['a', 'b', 'c', 'd']) {
        println!("{}", p.into_iter().collect::<String>());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_distinct_permutations() {
        let all: Vec<_> = permutations(vec![1, 2, 3, 4]).collect();
        assert_eq!(all.len(), 24);
        assert_eq!(all.iter().collect::<HashSet<_>>().len(), 24);
    }

    #[test]
    fn three_items_in_order() {
        let all: Vec<_> = permutations(vec![1, 2, 3]).collect();
        assert_eq!(
            all,
            [
                [2, 3, 1],
                [3, 2, 1],
                [3, 1, 2],
                [1, 3, 2],
                [2, 1, 3],
                [1, 2, 3],
            ]
        );
    }

    #[test]
    fn empty_list_has_one_permutation() {
        assert_eq!(permutations(Vec::<u8>::new()).count(), 1);
    }
}
