//! Edge iteration shared by every loop representation.
//!
//! A loop of `n` vertices has exactly `n` edges: `(v[i], v[(i + 1) % n])`,
//! so the last edge wraps back to the first vertex. Each call to
//! [`EdgeLoop::edges`] returns a fresh cursor that owns its position; the
//! loop itself is only borrowed, so any number of cursors can walk the same
//! loop independently. Cursors are fused: once exhausted they stay exhausted.

use std::iter::FusedIterator;

use crate::latlng::{AngleUnit, LatLng, Radians};

/// An ordered pair of adjacent loop vertices.
pub type Edge<U = Radians> = (LatLng<U>, LatLng<U>);

/// A closed loop of coordinates that can be traversed edge by edge.
pub trait EdgeLoop {
    type Unit: AngleUnit;

    type Edges<'a>: Iterator<Item = Edge<Self::Unit>> + FusedIterator
    where
        Self: 'a;

    /// Start a new, independent traversal of this loop's edges.
    fn edges(&self) -> Self::Edges<'_>;

    /// Whether the loop has no vertices (the "no shape" sentinel).
    fn is_empty(&self) -> bool;
}

/// Get-next style stepping over an edge iterator.
pub trait EdgeCursor<U: AngleUnit>: Iterator<Item = Edge<U>> {
    /// Advance and write the next edge into `from`/`to`.
    ///
    /// Returns `false` once the loop is exhausted, leaving the outputs untouched.
    fn step(&mut self, from: &mut LatLng<U>, to: &mut LatLng<U>) -> bool {
        match self.next() {
            Some((a, b)) => {
                *from = a;
                *to = b;
                true
            }
            None => false,
        }
    }
}

impl<U: AngleUnit, I: Iterator<Item = Edge<U>>> EdgeCursor<U> for I {}

/// Edge cursor over a contiguous vertex slice.
#[derive(Debug, Clone)]
pub struct SliceEdges<'a, U: AngleUnit = Radians> {
    verts: &'a [LatLng<U>],
    index: usize,
}

impl<'a, U: AngleUnit> SliceEdges<'a, U> {
    pub fn new(verts: &'a [LatLng<U>]) -> Self {
        Self { verts, index: 0 }
    }
}

impl<U: AngleUnit> Iterator for SliceEdges<'_, U> {
    type Item = Edge<U>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.verts.len();
        if self.index >= n {
            return None;
        }

        let from = self.verts[self.index];
        let to = self.verts[(self.index + 1) % n];
        self.index += 1;
        Some((from, to))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.verts.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<U: AngleUnit> ExactSizeIterator for SliceEdges<'_, U> {}

impl<U: AngleUnit> FusedIterator for SliceEdges<'_, U> {}
