//! Edges between lattice-adjacent points.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cells::CellId;
use crate::error::{ConstructionError, FillError, PlacementError};
use crate::lattice::{Lattice, PointId};

/// Canonical identity of an edge: an unordered pair of point ids, smaller first.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeKey {
    lo: PointId,
    hi: PointId,
}

impl EdgeKey {
    pub fn new(a: PointId, b: PointId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(self) -> PointId {
        self.lo
    }

    pub fn hi(self) -> PointId {
        self.hi
    }

    pub fn contains(self, point: PointId) -> bool {
        self.lo == point || self.hi == point
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lo, self.hi)
    }
}

/// Index of an edge in its [`EdgeSet`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque caller tag recorded on a filled edge (colour, piece id, ...).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FillTag(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    key: EdgeKey,
    filled: bool,
    tag: Option<FillTag>,
    pub(crate) cells: SmallVec<[CellId; 2]>,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Tag of the placement that filled this edge; `None` while unfilled.
    pub fn tag(&self) -> Option<FillTag> {
        self.tag
    }

    /// Cells bounded by this edge: one on the border, two inside.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Every edge of the board, indexed by [`EdgeKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSet {
    edges: Vec<Edge>,
    index: FxHashMap<EdgeKey, EdgeId>,
}

impl EdgeSet {
    /// Creates one edge per pair of lattice neighbours.
    ///
    /// Both endpoints discover each other, so the second discovery is skipped
    /// by key. Each new edge is registered on its two points.
    pub(crate) fn build(lattice: &mut Lattice) -> Result<Self, ConstructionError> {
        let mut set = Self {
            edges: Vec::new(),
            index: FxHashMap::default(),
        };

        let pairs: Vec<(PointId, PointId)> = lattice
            .points()
            .iter()
            .flat_map(|point| {
                point
                    .neighbors()
                    .iter()
                    .map(move |&neighbor| (point.id(), neighbor))
            })
            .collect();

        for (a, b) in pairs {
            let key = EdgeKey::new(a, b);
            if set.index.contains_key(&key) {
                continue;
            }
            let id = set.insert(key)?;
            for endpoint in [a, b] {
                if let Some(point) = lattice.point_mut(endpoint) {
                    point.edges.push(id);
                }
            }
        }

        Ok(set)
    }

    fn insert(&mut self, key: EdgeKey) -> Result<EdgeId, ConstructionError> {
        let id = EdgeId(self.edges.len() as u32);
        if self.index.insert(key, id).is_some() {
            return Err(ConstructionError::DuplicateEdge { key });
        }
        self.edges.push(Edge {
            key,
            filled: false,
            tag: None,
            cells: SmallVec::new(),
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    pub fn id_of(&self, key: EdgeKey) -> Option<EdgeId> {
        self.index.get(&key).copied()
    }

    /// The edge with this key, if the two points are lattice neighbours.
    pub fn edge_between(&self, key: EdgeKey) -> Option<&Edge> {
        self.id_of(key).and_then(|id| self.get(id))
    }

    pub fn filled_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.filled).count()
    }

    /// Marks an edge filled. Fails if it already is.
    pub(crate) fn fill(&mut self, key: EdgeKey, tag: FillTag) -> Result<EdgeId, FillError> {
        let id = self.id_of(key).ok_or(PlacementError::NotAdjacent {
            from: key.lo(),
            to: key.hi(),
        })?;
        let edge = &mut self.edges[id.index()];
        if edge.filled {
            return Err(FillError::Conflict { key });
        }
        edge.filled = true;
        edge.tag = Some(tag);
        Ok(id)
    }

    /// Clears an edge. Returns whether it was filled.
    pub(crate) fn unfill(&mut self, id: EdgeId) -> bool {
        match self.edges.get_mut(id.index()) {
            Some(edge) if edge.filled => {
                edge.filled = false;
                edge.tag = None;
                true
            }
            _ => false,
        }
    }
}
