//! Named facet collection.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Facet, MinCorner};

/// A model: the contents of one STL file.
///
/// The name comes from the ASCII `solid`/`endsolid` labels; binary files
/// have no name. Facets are kept in file order. Repair replaces the facet
/// list wholesale.
///
/// # Example
///
/// ```
/// use stl_types::{Facet, Model, Point3, Vector3};
///
/// let mut model = Model::new("bracket");
/// model.facets.push(Facet::from_vertices(
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ));
///
/// model.translate(&Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(model.min_corner().point(), Point3::new(0.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    /// Solid name (empty for binary input).
    pub name: String,
    /// Facets in file order.
    pub facets: Vec<Facet>,
}

impl Model {
    /// Create an empty model with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: Vec::new(),
        }
    }

    /// Create an empty model with room for `facet_count` facets.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, facet_count: usize) -> Self {
        Self {
            name: name.into(),
            facets: Vec::with_capacity(facet_count),
        }
    }

    /// Create a model from existing facets.
    #[must_use]
    pub fn from_facets(name: impl Into<String>, facets: Vec<Facet>) -> Self {
        Self {
            name: name.into(),
            facets,
        }
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// True if the model has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Iterate over every vertex of every facet (three per facet).
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.facets.iter().flat_map(|f| f.vertices.iter())
    }

    /// Per-axis minimum over all vertices.
    #[must_use]
    pub fn min_corner(&self) -> MinCorner {
        MinCorner::from_points(self.vertices())
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for facet in &mut self.facets {
            *facet = facet.translated(offset);
        }
    }
}
