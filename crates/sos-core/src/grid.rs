//! Fixed-size two-dimensional cell container.
//!
//! `Grid<T>` backs every spatial map in the simulation: expected patient
//! density (`Grid<u32>`), actual occupancy (`Grid<Vec<PatientId>>`), and each
//! rescue unit's belief map.  Storage is a single row-major `Vec<T>`; the
//! dimensions are fixed at construction.
//!
//! Access is bounds-checked: [`get`](Grid::get) returns `None` for cells
//! outside the grid, while `Index`/`IndexMut` panic; use them only where the
//! location has already been validated.

use std::ops::{Index, IndexMut};

use crate::{Location, SosError, SosResult};

/// A `width × height` grid of `T` addressed by [`Location`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width:  usize,
    height: usize,
    cells:  Vec<T>,
}

impl<T: Default> Grid<T> {
    /// Build a grid with every cell set to `T::default()`.
    ///
    /// Fails if either dimension is zero or does not fit an `i32` coordinate.
    pub fn new(width: usize, height: usize) -> SosResult<Self> {
        check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, T::default);
        Ok(Self { width, height, cells })
    }

    /// Reset every cell to `T::default()` without reallocating.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = T::default();
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` once per cell, row by row.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> SosResult<Self>
    where
        F: FnMut(Location) -> T,
    {
        check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(Location::new(x as i32, y as i32)));
            }
        }
        Ok(Self { width, height, cells })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` iff `0 ≤ x < width` and `0 ≤ y < height`.
    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        location.x >= 0
            && location.y >= 0
            && (location.x as usize) < self.width
            && (location.y as usize) < self.height
    }

    #[inline]
    fn offset_of(&self, location: Location) -> Option<usize> {
        self.contains(location)
            .then(|| location.y as usize * self.width + location.x as usize)
    }

    #[inline]
    pub fn get(&self, location: Location) -> Option<&T> {
        self.offset_of(location).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, location: Location) -> Option<&mut T> {
        self.offset_of(location).map(move |i| &mut self.cells[i])
    }

    /// Iterate `(location, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (Location::new((i % width) as i32, (i / width) as i32), cell)
        })
    }
}

impl Grid<u32> {
    /// Sum of all cell values.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }
}

impl<T> Index<Location> for Grid<T> {
    type Output = T;

    /// # Panics
    /// Panics if `location` is outside the grid.
    fn index(&self, location: Location) -> &T {
        match self.get(location) {
            Some(cell) => cell,
            None => panic!(
                "location {location} outside {}x{} grid",
                self.width, self.height
            ),
        }
    }
}

impl<T> IndexMut<Location> for Grid<T> {
    /// # Panics
    /// Panics if `location` is outside the grid.
    fn index_mut(&mut self, location: Location) -> &mut T {
        let (width, height) = (self.width, self.height);
        match self.get_mut(location) {
            Some(cell) => cell,
            None => panic!("location {location} outside {width}x{height} grid"),
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> SosResult<()> {
    if width == 0 || height == 0 {
        return Err(SosError::Config(format!(
            "grid dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(SosError::Config(format!(
            "grid dimensions {width}x{height} exceed the coordinate range"
        )));
    }
    Ok(())
}
