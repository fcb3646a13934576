//! Seed fill over a dense pixel grid
//!
//! The labeling and watershed passes both grow 4-connected components from
//! a seed. The fill works on row-major pixel indices with an explicit queue
//! and a caller-owned visited buffer, so a whole image can be swept with one
//! allocation.

use std::collections::VecDeque;

/// Visit the 4-neighbors of pixel `i` in a `width x height` grid.
///
/// Neighbors are produced in the order up, left, right, down.
#[inline]
pub(crate) fn for_each_neighbor(
    i: usize,
    width: usize,
    height: usize,
    mut f: impl FnMut(usize),
) {
    let x = i % width;
    let y = i / width;
    if y > 0 {
        f(i - width);
    }
    if x > 0 {
        f(i - 1);
    }
    if x + 1 < width {
        f(i + 1);
    }
    if y + 1 < height {
        f(i + width);
    }
}

/// Collect the 4-connected component containing `seed`.
///
/// A pixel joins the component when it is not yet `visited` and
/// `accept(pixel)` holds; every member is marked visited. The seed itself
/// is taken as a member without testing `accept`. Members are returned in
/// breadth-first order starting with the seed.
pub(crate) fn fill_component(
    seed: usize,
    width: usize,
    height: usize,
    visited: &mut [bool],
    mut accept: impl FnMut(usize) -> bool,
) -> Vec<usize> {
    let mut members = Vec::new();
    let mut queue = VecDeque::new();
    visited[seed] = true;
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        members.push(p);
        for_each_neighbor(p, width, height, |n| {
            if !visited[n] && accept(n) {
                visited[n] = true;
                queue.push_back(n);
            }
        });
    }

    members
}
