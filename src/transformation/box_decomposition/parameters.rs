/// The smallest number of cells along each edge of a voxel grid.
pub const MIN_RESOLUTION: u32 = 1;
/// The largest number of cells along each edge of a voxel grid.
pub const MAX_RESOLUTION: u32 = 100;

/// Clamps a number of boxes per edge to `[MIN_RESOLUTION, MAX_RESOLUTION]`.
#[inline]
pub fn clamp_resolution(resolution: u32) -> u32 {
    resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
}

/// Controls which cells a triangle mesh is considered to occupy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FillMode {
    /// Only the cells intersecting the boundary of the mesh are occupied.
    SurfaceOnly,
    /// The cells intersecting the boundary of the mesh, and the cells whose
    /// center is inside of the closed mesh, are occupied.
    Solid,
}

/// Parameters of the decomposition of a triangle mesh into boxes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DecompositionParameters {
    /// The number of cells along each edge of the voxel grid.
    ///
    /// Values outside of `[MIN_RESOLUTION, MAX_RESOLUTION]` are clamped.
    pub resolution: u32,
    /// Which cells are considered occupied by the mesh.
    pub fill_mode: FillMode,
}

impl DecompositionParameters {
    /// The resolution actually used by the decomposition.
    #[inline]
    pub fn clamped_resolution(&self) -> u32 {
        clamp_resolution(self.resolution)
    }
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            resolution: 10,
            fill_mode: FillMode::Solid,
        }
    }
}
