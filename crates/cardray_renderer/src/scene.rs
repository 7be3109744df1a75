//! The fixed scene: a grid of unit spheres spelling a logo over a floor.

use crate::hit::{HitKind, TraceResult, HIT_EPSILON};
use cardray_math::{Ray, Vec3};

/// Number of sphere rows in the grid.
pub const GRID_ROWS: usize = 9;

/// Number of sphere columns in the grid.
pub const GRID_COLUMNS: usize = 19;

/// Per-row bitmasks of the logo. Row `j`, bit `k` set means a sphere at
/// column `k` of row `j`.
pub const LOGO_ROW_MASKS: [u32; GRID_ROWS] = [
    247570, 280596, 280600, 249748, 18578, 18577, 231184, 16, 16,
];

/// Presence grid of unit spheres.
///
/// The cell at `(column k, row j)` hosts a sphere of radius 1 centered at
/// `(k, 0, j + 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphereGrid {
    cells: [[bool; GRID_COLUMNS]; GRID_ROWS],
}

impl SphereGrid {
    /// A grid with no spheres.
    pub fn empty() -> Self {
        Self {
            cells: [[false; GRID_COLUMNS]; GRID_ROWS],
        }
    }

    /// Decode a grid from one bitmask per row. Bits above the last column
    /// are ignored.
    pub fn from_row_masks(masks: &[u32; GRID_ROWS]) -> Self {
        let mut grid = Self::empty();
        for (row, mask) in masks.iter().enumerate() {
            for column in 0..GRID_COLUMNS {
                grid.cells[row][column] = mask & (1 << column) != 0;
            }
        }
        grid
    }

    /// The logo grid rendered by cardray.
    pub fn logo() -> Self {
        Self::from_row_masks(&LOGO_ROW_MASKS)
    }

    /// Whether a sphere occupies `(column, row)`. Out-of-range cells are empty.
    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        row < GRID_ROWS && column < GRID_COLUMNS && self.cells[row][column]
    }

    /// World-space center of the sphere in `(column, row)`.
    pub fn center(column: usize, row: usize) -> Vec3 {
        Vec3::new(column as f64, 0.0, row as f64 + 4.0)
    }

    /// Centers of every occupied cell, row-major.
    pub fn centers(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..GRID_ROWS).flat_map(move |row| {
            (0..GRID_COLUMNS)
                .filter(move |&column| self.cells[row][column])
                .map(move |column| Self::center(column, row))
        })
    }

    /// Number of spheres in the grid.
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().filter(|&&occupied| occupied).count()
    }

    /// Check if the grid holds no spheres.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SphereGrid {
    fn default() -> Self {
        Self::logo()
    }
}

/// The world: sphere grid plus the infinite floor plane z = 0.
#[derive(Debug, Clone)]
pub struct Scene {
    grid: SphereGrid,
    // Cached so tracing does not rescan the grid
    centers: Vec<Vec3>,
}

impl Scene {
    /// Create a scene from a sphere grid.
    pub fn new(grid: SphereGrid) -> Self {
        let centers = grid.centers().collect();
        Self { grid, centers }
    }

    /// The logo scene.
    pub fn logo() -> Self {
        Self::new(SphereGrid::logo())
    }

    /// Get the sphere grid.
    pub fn grid(&self) -> &SphereGrid {
        &self.grid
    }

    /// Find the nearest surface along `ray`.
    ///
    /// `ray.direction` must be normalized. The result is a pure function of
    /// the ray and the grid.
    pub fn trace(&self, ray: &Ray) -> TraceResult {
        let mut rec = TraceResult::default();

        // The floor is tested first and unconditionally replaces the
        // sentinel, even past it.
        let t = -ray.origin.z / ray.direction.z;
        if t > HIT_EPSILON {
            rec.kind = HitKind::Floor;
            rec.distance = t;
            rec.normal = Some(Vec3::Z);
        }

        for &center in &self.centers {
            let p = ray.origin - center;
            let b = p.dot(ray.direction);
            let c = p.dot(p) - 1.0;
            let q = b * b - c;

            if q > 0.0 {
                let s = -b - q.sqrt();
                rec.offer(HitKind::Sphere, s, || (p + ray.direction * s).normalize());
            }
        }

        rec
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::logo()
    }
}
