//! Sorting the subpaths of a compound path into outer shapes and the holes
//! or inner parts they contain.

use itertools::Itertools;
use crate::prelude::*;

/// A subpath with the subpaths nested inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Nested {
    pub outline: Subpath,
    pub children: Vec<Nested>,
}

struct Candidate {
    bounds: Frame,
    area: f64,
}

/// Builds the containment forest of `subpaths`.
///
/// Larger subpaths are placed first (by enclosed area, earlier declaration on
/// ties); each one becomes a child of the smallest placed subpath whose bounds
/// contain its own, or a new root. Siblings keep declaration order.
pub fn resolve(subpaths: Vec<Subpath>, tolerance: f64) -> Vec<Nested> {
    let candidates: Vec<Candidate> = subpaths.iter().map(|s| Candidate {
        bounds: s.bounds().unwrap_or_default(),
        area: s.signed_area().abs(),
    }).collect();

    let order = (0..candidates.len())
        .sorted_by(|&a, &b| candidates[b].area.partial_cmp(&candidates[a].area)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b)));

    let mut parent: Vec<Option<usize>> = vec![None; candidates.len()];
    let mut placed: Vec<usize> = Vec::with_capacity(candidates.len());
    for i in order {
        let inner = &candidates[i];
        let mut best: Option<usize> = None;
        for &j in &placed {
            let outer = &candidates[j];
            if !outer.bounds.contains(&inner.bounds, tolerance) {
                continue;
            }
            // later placements are nested deeper on equal areas
            match best {
                Some(b) if candidates[b].area < outer.area => {}
                _ => best = Some(j),
            }
        }
        parent[i] = best;
        placed.push(i);
    }
    debug!("nesting: {:?}", parent);

    let mut slots: Vec<Option<Subpath>> = subpaths.into_iter().map(Some).collect();
    (0..slots.len())
        .filter(|&i| parent[i].is_none())
        .filter_map(|i| build(i, &parent, &mut slots))
        .collect()
}

fn build(index: usize, parent: &[Option<usize>], slots: &mut [Option<Subpath>]) -> Option<Nested> {
    let outline = slots[index].take()?;
    let children = (0..parent.len())
        .filter(|&j| parent[j] == Some(index))
        .filter_map(|j| build(j, parent, slots))
        .collect();
    Some(Nested { outline, children })
}

#[cfg(test)]
fn nested(d: &str) -> Vec<Nested> {
    let options = ConvertOptions::default();
    let subpaths = crate::subpath::build_subpaths(PathData::new(d).unwrap(), &options).unwrap();
    resolve(subpaths, options.tolerance)
}

#[test]
fn test_hole_is_child() {
    let tree = nested("M0 0 H100 V100 H0 Z M20 20 V80 H80 V20 Z");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].outline.points[0].position, vec(20., 20.));
}

#[test]
fn test_hole_declared_first() {
    let tree = nested("M20 20 V80 H80 V20 Z M0 0 H100 V100 H0 Z");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].outline.points[0].position, vec(0., 0.));
    assert_eq!(tree[0].children.len(), 1);
}

#[test]
fn test_disjoint_siblings() {
    let tree = nested("M0 0 H10 V10 H0 Z M20 0 H40 V20 H20 Z");
    assert_eq!(tree.len(), 2);
    // declaration order, not area order
    assert_eq!(tree[0].outline.points[0].position, vec(0., 0.));
    assert!(tree.iter().all(|n| n.children.is_empty()));
}

#[test]
fn test_deep_nesting() {
    // target ring with a dot in the middle
    let tree = nested("M0 0 H100 V100 H0 Z M10 10 V90 H90 V10 Z M40 40 H60 V60 H40 Z");
    assert_eq!(tree.len(), 1);
    let ring = &tree[0].children;
    assert_eq!(ring.len(), 1);
    assert_eq!(ring[0].children.len(), 1);
    assert_eq!(ring[0].children[0].outline.points[0].position, vec(40., 40.));
}

#[test]
fn test_equal_areas_first_declared_is_outer() {
    let tree = nested("M0 0 H10 V10 H0 Z M0 0 H10 V10 H0 Z");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children.len(), 1);
}
