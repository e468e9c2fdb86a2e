//! IVF-Flat approximate nearest-neighbor index over squared-L2 distance.
//!
//! Vectors are partitioned into `n_cells` coarse cells around trained
//! centroids; a query probes the `n_probe` nearest cells and scans their
//! contents exhaustively. With the default single cell the index degrades
//! to an exact exhaustive scan, which is the intended operating point at
//! catalog sizes up to ~10^4-10^5 entries. Larger deployments raise
//! `n_cells` and trade recall for speed without changing the contract.

use ordered_float::OrderedFloat;
use rand::seq::index::sample;
use tracing::debug;

use crate::error::{Error, Result};
use crate::vector::Vector;

const KMEANS_ITERATIONS: usize = 10;

/// Coarse-partition tuning. `n_probe` is clamped to `n_cells` at search
/// time, so `n_probe >= n_cells` always means an exhaustive scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IvfConfig {
    pub n_cells: usize,
    pub n_probe: usize,
}

impl Default for IvfConfig {
    fn default() -> Self {
        Self {
            n_cells: 1,
            n_probe: 1,
        }
    }
}

/// An inverted-file flat index. Train once on the base vectors, add them,
/// then search. Positions are assigned in insertion order and are stable.
#[derive(Debug, Clone)]
pub struct IvfFlatIndex {
    dim: usize,
    config: IvfConfig,
    centroids: Vec<Vector>,
    /// Per-cell position lists, positions ascending.
    cells: Vec<Vec<usize>>,
    vectors: Vec<Vector>,
}

impl IvfFlatIndex {
    pub fn new(dim: usize, config: IvfConfig) -> Result<Self> {
        if config.n_cells == 0 {
            return Err(Error::InvalidConfig("n_cells must be at least 1".to_string()));
        }
        if config.n_probe == 0 {
            return Err(Error::InvalidConfig("n_probe must be at least 1".to_string()));
        }
        Ok(Self {
            dim,
            config,
            centroids: Vec::new(),
            cells: Vec::new(),
            vectors: Vec::new(),
        })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_trained(&self) -> bool {
        !self.centroids.is_empty()
    }

    /// Train the coarse quantizer on the base vectors. With one cell the
    /// centroid is simply the sample mean (its exact position is
    /// irrelevant when every vector lands in the same cell); with more
    /// cells a few rounds of Lloyd's k-means are run.
    pub fn train(&mut self, samples: &[Vector]) -> Result<()> {
        for sample in samples {
            self.check_dim(sample)?;
        }

        let k = self.config.n_cells.min(samples.len()).max(1);
        self.centroids = if k == 1 {
            vec![mean(samples, self.dim)]
        } else {
            kmeans(samples, k, self.dim)
        };
        self.cells = vec![Vec::new(); self.centroids.len()];
        debug!(
            cells = self.centroids.len(),
            samples = samples.len(),
            "trained coarse quantizer"
        );
        Ok(())
    }

    /// Insert a vector, returning its position. Positions count up from
    /// zero in insertion order.
    pub fn add(&mut self, vector: Vector) -> Result<usize> {
        if !self.is_trained() {
            return Err(Error::IndexNotTrained);
        }
        self.check_dim(&vector)?;

        let cell = self.nearest_centroid(&vector);
        let position = self.vectors.len();
        self.cells[cell].push(position);
        self.vectors.push(vector);
        Ok(position)
    }

    /// Top-k nearest positions by ascending squared-L2 distance, ties
    /// broken by insertion order. The result is truncated, never padded,
    /// when fewer than `k` vectors are probed.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<(usize, f32)>> {
        if !self.is_trained() {
            return Err(Error::IndexNotTrained);
        }
        self.check_dim(query)?;

        // Probe the n_probe nearest cells.
        let mut by_centroid: Vec<(usize, f32)> = self
            .centroids
            .iter()
            .enumerate()
            .map(|(cell, centroid)| (cell, query.squared_l2(centroid)))
            .collect();
        by_centroid.sort_by_key(|&(cell, distance)| (OrderedFloat(distance), cell));

        let mut hits: Vec<(usize, f32)> = by_centroid
            .iter()
            .take(self.config.n_probe)
            .flat_map(|&(cell, _)| &self.cells[cell])
            .map(|&position| (position, query.squared_l2(&self.vectors[position])))
            .collect();
        hits.sort_by_key(|&(position, distance)| (OrderedFloat(distance), position));
        hits.truncate(k);
        Ok(hits)
    }

    fn nearest_centroid(&self, vector: &Vector) -> usize {
        self.centroids
            .iter()
            .enumerate()
            .min_by_key(|(_, centroid)| OrderedFloat(vector.squared_l2(centroid)))
            .map(|(cell, _)| cell)
            .unwrap_or(0)
    }

    fn check_dim(&self, vector: &Vector) -> Result<()> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        Ok(())
    }
}

fn mean(samples: &[Vector], dim: usize) -> Vector {
    let mut acc = vec![0.0f32; dim];
    for sample in samples {
        for (a, x) in acc.iter_mut().zip(sample.as_slice()) {
            *a += x;
        }
    }
    if !samples.is_empty() {
        let inv = 1.0 / samples.len() as f32;
        for a in &mut acc {
            *a *= inv;
        }
    }
    Vector::new(acc)
}

/// Lloyd's k-means with random distinct seeding. `k <= samples.len()` is
/// guaranteed by the caller.
fn kmeans(samples: &[Vector], k: usize, dim: usize) -> Vec<Vector> {
    let mut rng = rand::rng();
    let mut centroids: Vec<Vector> = sample(&mut rng, samples.len(), k)
        .iter()
        .map(|i| samples[i].clone())
        .collect();

    for _ in 0..KMEANS_ITERATIONS {
        let mut sums = vec![vec![0.0f32; dim]; k];
        let mut counts = vec![0usize; k];
        for vector in samples {
            let cell = centroids
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| OrderedFloat(vector.squared_l2(c)))
                .map(|(i, _)| i)
                .unwrap_or(0);
            counts[cell] += 1;
            for (a, x) in sums[cell].iter_mut().zip(vector.as_slice()) {
                *a += x;
            }
        }
        for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
            // Empty cells keep their previous centroid.
            if count > 0 {
                let inv = 1.0 / count as f32;
                *centroid = Vector::new(sum.into_iter().map(|x| x * inv).collect());
            }
        }
    }
    centroids
}
