//! Mapping between the surface mesh of a cell and its skeleton.
//!
//! A neuron is described twice: by a 1D skeleton (its centerline, on which the
//! cable-equation simulation runs) and by a 2D triangulated surface (what is
//! displayed and hit by rays). The [`SkeletonMapping`] relates every surface
//! vertex to the skeleton segment it wraps, so that:
//!
//! * a hit on the surface can be translated into a skeleton vertex index with
//!   [`SkeletonMapping::nearest_skeleton_vertex`];
//! * values computed on the skeleton can be displayed on the surface with
//!   [`SkeletonMapping::interpolate_values`].

pub use self::skeleton_mapping::{build_map, SkeletonMapEntry, SkeletonMapping};
pub use self::skeleton_mesh::{MappingAttachment, SkeletonMesh, SurfaceMesh};

mod skeleton_mapping;
mod skeleton_mesh;

/// Error indicating that a [`SkeletonMapping`] could not be built.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapBuildError {
    /// The skeleton mesh has no vertex.
    #[error("map not built: the skeleton mesh has no vertex")]
    EmptySkeleton,
    /// The surface mesh has no vertex.
    #[error("map not built: the surface mesh has no vertex")]
    EmptySurface,
    /// The skeleton mesh has no diameter attachment.
    #[error("map not built: the skeleton mesh has no diameter attachment")]
    MissingDiameters,
    /// The surface mesh has no mapping attachment.
    #[error("map not built: the surface mesh has no mapping attachment")]
    MissingMapping,
    /// An attachment does not have exactly one element per vertex.
    #[error(
        "map not built: the {attachment} attachment has {found} elements instead of {expected}"
    )]
    AttachmentLengthMismatch {
        /// The name of the faulty attachment.
        attachment: &'static str,
        /// The number of vertices of the mesh carrying the attachment.
        expected: usize,
        /// The number of elements of the attachment.
        found: usize,
    },
    /// The interpolation factor of a surface vertex is NaN or infinite.
    #[error("map not built: the surface vertex {0} has a non-finite interpolation factor")]
    NonFiniteLambda(usize),
    /// The start or end point of the mapping attachment of a surface vertex is not finite.
    #[error("map not built: the surface vertex {0} has a non-finite mapping endpoint")]
    NonFiniteEndpoint(usize),
    /// A skeleton vertex has a NaN or infinite coordinate.
    #[error("map not built: the skeleton vertex {0} is not finite")]
    NonFiniteSkeletonVertex(usize),
}

/// Error returned by the queries of a [`SkeletonMapping`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MappingQueryError {
    /// The given surface vertex index does not exist.
    #[error("the surface vertex {0} does not exist")]
    SurfaceVertexOutOfRange(usize),
    /// The number of values does not match the number of skeleton vertices.
    #[error("expected one value per skeleton vertex ({expected}), found {found}")]
    ValueCountMismatch {
        /// The number of skeleton vertices.
        expected: usize,
        /// The number of values given.
        found: usize,
    },
}
