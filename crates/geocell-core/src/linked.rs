//! Incrementally built loops and polygons.
//!
//! Used when the final size of a shape is unknown until it has been
//! assembled, e.g. while merging the boundaries of many cells. Every link
//! points forward: a loop links its coordinates first to last, a polygon
//! links its loops first to last (the first loop is the exterior ring), and a
//! polygon links to the next polygon of a multipolygon. Coordinates and loops
//! live in arenas owned by their loop and polygon, so a link is an index and
//! no structure can ever point back at its owner.

use std::fmt;
use std::iter::FusedIterator;

use crate::edges::{Edge, EdgeLoop};
use crate::geofence::Geofence;
use crate::latlng::{LatLng, Radians};
use crate::polygon::{GeoMultiPolygon, GeoPolygon};

/// Index of a coordinate node within its loop.
pub type NodeId = usize;

/// Index of a loop within its polygon.
pub type LoopId = usize;

/// A coordinate node in a linked loop.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedLatLng {
    pub vertex: LatLng,
    next: Option<NodeId>,
}

impl LinkedLatLng {
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

/// A closed loop built by appending coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedGeoLoop {
    nodes: Vec<LinkedLatLng>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    next: Option<LoopId>,
}

impl LinkedGeoLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a coordinate after the current last one.
    pub fn add_vertex(&mut self, vertex: LatLng) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(LinkedLatLng { vertex, next: None });
        match self.last {
            Some(last) => self.nodes[last].next = Some(id),
            None => self.first = Some(id),
        }
        self.last = Some(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&LinkedLatLng> {
        self.nodes.get(id)
    }

    pub fn first(&self) -> Option<&LinkedLatLng> {
        self.first.and_then(|id| self.node(id))
    }

    pub fn last(&self) -> Option<&LinkedLatLng> {
        self.last.and_then(|id| self.node(id))
    }

    /// Sibling loop in the owning polygon.
    pub fn next(&self) -> Option<LoopId> {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of coordinates reachable from the first node.
    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    /// Coordinates in link order.
    pub fn vertices(&self) -> impl Iterator<Item = &LatLng> + '_ {
        let mut current = self.first;
        std::iter::from_fn(move || {
            let node = self.node(current?)?;
            current = node.next;
            Some(&node.vertex)
        })
    }
}

impl EdgeLoop for LinkedGeoLoop {
    type Unit = Radians;
    type Edges<'a> = LinkedEdges<'a>;

    fn edges(&self) -> Self::Edges<'_> {
        LinkedEdges {
            lp: self,
            cursor: Cursor::Start,
        }
    }

    fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

impl Extend<LatLng> for LinkedGeoLoop {
    fn extend<I: IntoIterator<Item = LatLng>>(&mut self, iter: I) {
        for vertex in iter {
            self.add_vertex(vertex);
        }
    }
}

impl FromIterator<LatLng> for LinkedGeoLoop {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        let mut lp = Self::new();
        lp.extend(iter);
        lp
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    At(NodeId),
    Done,
}

/// Edge cursor over a [`LinkedGeoLoop`].
///
/// The edge leaving the last node ends at the loop's first node.
#[derive(Debug, Clone)]
pub struct LinkedEdges<'a> {
    lp: &'a LinkedGeoLoop,
    cursor: Cursor,
}

impl Iterator for LinkedEdges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let lp = self.lp;
        let current = match self.cursor {
            Cursor::Start => lp.first,
            Cursor::At(id) => lp.node(id).and_then(|node| node.next),
            Cursor::Done => None,
        };

        match current.and_then(|id| lp.node(id).map(|node| (id, node))) {
            Some((id, node)) => {
                let to = node
                    .next
                    .or(lp.first)
                    .and_then(|next| lp.node(next))
                    .unwrap_or(node);
                self.cursor = Cursor::At(id);
                Some((node.vertex, to.vertex))
            }
            None => {
                self.cursor = Cursor::Done;
                None
            }
        }
    }
}

impl FusedIterator for LinkedEdges<'_> {}

/// A polygon built by appending loops. The first loop is the exterior ring,
/// later loops are holes.
///
/// `Clone`, `PartialEq` and `Debug` walk the sibling chain iteratively, like
/// `Drop`, so chains of any length are safe to copy, compare and print.
#[derive(Default)]
pub struct LinkedGeoPolygon {
    loops: Vec<LinkedGeoLoop>,
    first: Option<LoopId>,
    last: Option<LoopId>,
    next: Option<Box<LinkedGeoPolygon>>,
}

impl LinkedGeoPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty loop and return it for filling.
    pub fn add_new_loop(&mut self) -> &mut LinkedGeoLoop {
        let id = self.add_linked_loop(LinkedGeoLoop::new());
        &mut self.loops[id]
    }

    /// Append an already built loop.
    pub fn add_linked_loop(&mut self, mut lp: LinkedGeoLoop) -> LoopId {
        let id = self.loops.len();
        lp.next = None;
        self.loops.push(lp);
        match self.last {
            Some(last) => self.loops[last].next = Some(id),
            None => self.first = Some(id),
        }
        self.last = Some(id);
        log::trace!("Appended loop {} to linked polygon", id);
        id
    }

    pub fn get_loop(&self, id: LoopId) -> Option<&LinkedGeoLoop> {
        self.loops.get(id)
    }

    pub fn get_loop_mut(&mut self, id: LoopId) -> Option<&mut LinkedGeoLoop> {
        self.loops.get_mut(id)
    }

    pub fn first(&self) -> Option<&LinkedGeoLoop> {
        self.first.and_then(|id| self.get_loop(id))
    }

    pub fn last(&self) -> Option<&LinkedGeoLoop> {
        self.last.and_then(|id| self.get_loop(id))
    }

    /// The exterior ring, by convention the first loop.
    pub fn exterior(&self) -> Option<&LinkedGeoLoop> {
        self.first()
    }

    /// Loops in link order, exterior first.
    pub fn loops(&self) -> impl Iterator<Item = &LinkedGeoLoop> + '_ {
        let mut current = self.first;
        std::iter::from_fn(move || {
            let lp = self.get_loop(current?)?;
            current = lp.next;
            Some(lp)
        })
    }

    pub fn holes(&self) -> impl Iterator<Item = &LinkedGeoLoop> + '_ {
        self.loops().skip(1)
    }

    pub fn loop_count(&self) -> usize {
        self.loops().count()
    }

    /// The next polygon of the multipolygon chain.
    pub fn next(&self) -> Option<&LinkedGeoPolygon> {
        self.next.as_deref()
    }

    /// Append an empty polygon at the end of the chain and return it.
    pub fn add_new_polygon(&mut self) -> &mut LinkedGeoPolygon {
        let mut slot = &mut self.next;
        while let Some(polygon) = slot {
            slot = &mut polygon.next;
        }
        log::trace!("Appended polygon to linked multipolygon");
        &mut **slot.insert(Box::new(LinkedGeoPolygon::new()))
    }

    /// This polygon followed by every sibling in the chain.
    pub fn polygons(&self) -> impl Iterator<Item = &LinkedGeoPolygon> + '_ {
        let mut current = Some(self);
        std::iter::from_fn(move || {
            let polygon = current?;
            current = polygon.next();
            Some(polygon)
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons().count()
    }

    /// Copy of this polygon's own loops, without its siblings.
    fn clone_detached(&self) -> Self {
        Self {
            loops: self.loops.clone(),
            first: self.first,
            last: self.last,
            next: None,
        }
    }

    fn links(&self) -> (&[LinkedGeoLoop], Option<LoopId>, Option<LoopId>) {
        (&self.loops, self.first, self.last)
    }
}

impl Clone for LinkedGeoPolygon {
    fn clone(&self) -> Self {
        let mut head = self.clone_detached();
        let mut tail = &mut head;
        for polygon in self.polygons().skip(1) {
            tail = &mut **tail.next.insert(Box::new(polygon.clone_detached()));
        }
        head
    }
}

impl PartialEq for LinkedGeoPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.polygons()
            .map(Self::links)
            .eq(other.polygons().map(Self::links))
    }
}

/// One chain member, printed without its `next` link.
struct PolygonEntry<'a>(&'a LinkedGeoPolygon);

impl fmt::Debug for PolygonEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedGeoPolygon")
            .field("loops", &self.0.loops)
            .field("first", &self.0.first)
            .field("last", &self.0.last)
            .finish()
    }
}

/// Prints the whole chain as a list of polygons.
impl fmt::Debug for LinkedGeoPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.polygons().map(PolygonEntry))
            .finish()
    }
}

impl Drop for LinkedGeoPolygon {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse.
        let mut next = self.next.take();
        while let Some(mut polygon) = next {
            next = polygon.next.take();
        }
    }
}

impl From<&LinkedGeoLoop> for Geofence {
    fn from(lp: &LinkedGeoLoop) -> Self {
        lp.vertices().copied().collect()
    }
}

/// Flatten a single linked polygon (ignoring its siblings).
impl From<&LinkedGeoPolygon> for GeoPolygon {
    fn from(polygon: &LinkedGeoPolygon) -> Self {
        let geofence = polygon.exterior().map(Geofence::from).unwrap_or_default();
        let holes = polygon.holes().map(Geofence::from).collect();
        GeoPolygon::with_holes(geofence, holes)
    }
}

/// Flatten a whole linked polygon chain.
impl From<&LinkedGeoPolygon> for GeoMultiPolygon {
    fn from(polygon: &LinkedGeoPolygon) -> Self {
        let multi: GeoMultiPolygon = polygon.polygons().map(GeoPolygon::from).collect();
        log::trace!(
            "Flattened linked multipolygon into {} polygons",
            multi.polygon_count()
        );
        multi
    }
}
