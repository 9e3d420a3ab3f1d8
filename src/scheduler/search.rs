//! Generic backtracking subset enumeration.
//!
//! Domain-agnostic: callers supply the pruning and acceptance predicates.
//! The gap finder drives it with capacity sums, but nothing here knows about
//! tables.

/// Enumerate every combination of `choices` that `accept` approves.
///
/// Depth-first exploration: after each extension the partial path is tested.
/// A rejected path abandons the whole branch; an accepted path is recorded as
/// a solution and not extended further. Extension only ever uses candidates
/// with a strictly greater index than the path's last element, so each
/// returned combination is unique; the same set of elements can never come
/// back in a different order.
pub fn backtrack<T, R, A>(choices: &[T], mut reject: R, mut accept: A) -> Vec<Vec<T>>
where
    T: Clone,
    R: FnMut(&[T]) -> bool,
    A: FnMut(&[T]) -> bool,
{
    let mut solutions = Vec::new();
    let mut path = Vec::new();
    explore(choices, 0, &mut path, &mut reject, &mut accept, &mut solutions);
    solutions
}

fn explore<T, R, A>(
    choices: &[T],
    from: usize,
    path: &mut Vec<T>,
    reject: &mut R,
    accept: &mut A,
    solutions: &mut Vec<Vec<T>>,
) where
    T: Clone,
    R: FnMut(&[T]) -> bool,
    A: FnMut(&[T]) -> bool,
{
    if reject(path) {
        return;
    }
    if accept(path) {
        solutions.push(path.clone());
        return;
    }

    for i in from..choices.len() {
        path.push(choices[i].clone());
        explore(choices, i + 1, path, reject, accept, solutions);
        path.pop();
    }
}
