// crates/icetruth-core/src/core/particle.rs
// ============================================================================
// Module: Particles and Particle Trees
// Description: Monte-Carlo particle records and the decay/interaction tree.
// Purpose: Provide value-like particles and read-only hierarchical lookup.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ParticleTree`] is an arena of particles with parent links. Roots are
//! the primaries of the simulated interaction. Tree indexing through
//! [`ParticleTree::nth`] follows depth-first pre-order, so entry 0 is the first
//! primary and entry 1 is either its first daughter or the second primary.
//! Invariants:
//! - Parent links always point at earlier arena slots.
//! - The tree is never mutated by extraction code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// PDG encoding used for hadronic cascades in simulation trees.
pub const HADRONS_PDG: i32 = -2_000_001_006;
/// PDG encoding of the negative muon (absolute value matches both charges).
pub const MUON_PDG: i32 = 13;

// ============================================================================
// SECTION: Kinematics
// ============================================================================

/// Cartesian position in detector coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate (depth axis).
    pub z: f64,
}

impl Position {
    /// Creates a position from coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
        }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}

/// Direction given as the angles the particle came from (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    /// Azimuth angle.
    pub azimuth: f64,
    /// Zenith angle.
    pub zenith: f64,
}

impl Direction {
    /// Creates a direction from azimuth and zenith.
    #[must_use]
    pub const fn new(azimuth: f64, zenith: f64) -> Self {
        Self {
            azimuth,
            zenith,
        }
    }
}

// ============================================================================
// SECTION: Particle
// ============================================================================

/// Topological shape tag of a simulated particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParticleShape {
    /// No shape assigned.
    #[default]
    Null,
    /// Primary particle.
    Primary,
    /// Top-level air shower.
    TopShower,
    /// Point-like cascade.
    Cascade,
    /// Segment of an extended cascade.
    CascadeSegment,
    /// Track that crosses the whole detector.
    InfiniteTrack,
    /// Track that starts inside the detector.
    StartingTrack,
    /// Track that stops inside the detector.
    StoppingTrack,
    /// Track that starts and stops inside the detector.
    ContainedTrack,
    /// Propagated Monte-Carlo track.
    MCTrack,
    /// Invisible particle.
    Dark,
}

impl ParticleShape {
    /// Returns true for shapes that carry track energy out of the vertex.
    #[must_use]
    pub const fn is_track_like(self) -> bool {
        matches!(self, Self::StartingTrack | Self::Dark)
    }
}

/// Simulated particle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Kinetic energy (GeV); `null` on the wire decodes as NaN.
    #[serde(deserialize_with = "float_or_nan")]
    pub energy: f64,
    /// Total energy including rest mass (GeV).
    #[serde(deserialize_with = "float_or_nan")]
    pub total_energy: f64,
    /// Vertex position.
    pub pos: Position,
    /// Direction of origin.
    pub dir: Direction,
    /// PDG particle code.
    pub pdg_encoding: i32,
    /// Track length (metres); zero or NaN for non-tracks.
    #[serde(default, deserialize_with = "float_or_nan")]
    pub length: f64,
    /// Shape tag.
    #[serde(default)]
    pub shape: ParticleShape,
}

impl Particle {
    /// Returns true when the particle is a hadronic cascade.
    #[must_use]
    pub const fn is_hadronic_cascade(&self) -> bool {
        self.pdg_encoding == HADRONS_PDG
    }

    /// Returns true when the particle is a muon of either charge.
    #[must_use]
    pub const fn is_muon(&self) -> bool {
        self.pdg_encoding.unsigned_abs() == MUON_PDG.unsigned_abs()
    }
}

/// Decodes a float where JSON `null` stands for NaN.
fn float_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// ============================================================================
// SECTION: Particle Tree
// ============================================================================

/// Arena slot identifier inside a [`ParticleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(usize);

impl ParticleId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Arena node pairing a particle with its parent link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Particle stored in this slot.
    pub particle: Particle,
    /// Parent slot, `None` for primaries.
    #[serde(default)]
    pub parent: Option<ParticleId>,
}

/// Errors raised while building a particle tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Parent identifier does not refer to an existing slot.
    #[error("unknown parent particle slot {0}")]
    UnknownParent(usize),
}

/// Decay/interaction tree of simulated particles.
///
/// # Invariants
/// - Parents precede their daughters in the arena.
/// - Daughter order is insertion order.
/// - `roots` and `children` always index exactly the parent links in `nodes`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<TreeNode>", into = "Vec<TreeNode>")]
pub struct ParticleTree {
    /// Arena of nodes.
    nodes: Vec<TreeNode>,
    /// Primaries in insertion order.
    roots: Vec<ParticleId>,
    /// Daughters of each arena slot in insertion order.
    children: Vec<Vec<ParticleId>>,
}

impl ParticleTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a root particle.
    pub fn add_primary(&mut self, particle: Particle) -> ParticleId {
        let id = self.push_node(particle, None);
        self.roots.push(id);
        id
    }

    /// Appends a daughter to an existing particle.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownParent`] when `parent` is not in the tree.
    pub fn append_child(
        &mut self,
        parent: ParticleId,
        particle: Particle,
    ) -> Result<ParticleId, TreeError> {
        if parent.0 >= self.nodes.len() {
            return Err(TreeError::UnknownParent(parent.0));
        }
        let id = self.push_node(particle, Some(parent));
        if let Some(daughters) = self.children.get_mut(parent.0) {
            daughters.push(id);
        }
        Ok(id)
    }

    /// Number of particles in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the tree holds no particles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a particle by slot.
    #[must_use]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.nodes.get(id.0).map(|node| &node.particle)
    }

    /// Root particle identifiers in insertion order.
    #[must_use]
    pub fn primaries(&self) -> &[ParticleId] {
        &self.roots
    }

    /// Direct daughters of a particle in insertion order.
    #[must_use]
    pub fn daughters(&self, id: ParticleId) -> &[ParticleId] {
        self.children.get(id.0).map_or(&[][..], Vec::as_slice)
    }

    /// Returns the `n`-th particle in depth-first pre-order.
    ///
    /// The walk stops at `n`, so low indices cost only the path to them.
    #[must_use]
    pub fn nth(&self, n: usize) -> Option<&Particle> {
        let mut remaining = n;
        let mut stack = vec![self.roots.iter()];
        while let Some(level) = stack.last_mut() {
            let Some(&id) = level.next() else {
                stack.pop();
                continue;
            };
            if remaining == 0 {
                return self.get(id);
            }
            remaining -= 1;
            stack.push(self.daughters(id).iter());
        }
        None
    }

    /// Particle identifiers in depth-first pre-order.
    #[must_use]
    pub fn pre_order(&self) -> Vec<ParticleId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.roots.iter()];
        while let Some(level) = stack.last_mut() {
            let Some(&id) = level.next() else {
                stack.pop();
                continue;
            };
            order.push(id);
            stack.push(self.daughters(id).iter());
        }
        order
    }

    /// Pushes a node and its empty daughter list.
    fn push_node(&mut self, particle: Particle, parent: Option<ParticleId>) -> ParticleId {
        let id = ParticleId(self.nodes.len());
        self.nodes.push(TreeNode {
            particle,
            parent,
        });
        self.children.push(Vec::new());
        id
    }
}

impl TryFrom<Vec<TreeNode>> for ParticleTree {
    type Error = TreeError;

    fn try_from(nodes: Vec<TreeNode>) -> Result<Self, Self::Error> {
        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            match node.parent {
                None => roots.push(ParticleId(index)),
                Some(parent) if parent.0 < index => {
                    if let Some(daughters) = children.get_mut(parent.0) {
                        daughters.push(ParticleId(index));
                    }
                }
                Some(parent) => return Err(TreeError::UnknownParent(parent.0)),
            }
        }
        Ok(Self {
            nodes,
            roots,
            children,
        })
    }
}

impl From<ParticleTree> for Vec<TreeNode> {
    fn from(tree: ParticleTree) -> Self {
        tree.nodes
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
