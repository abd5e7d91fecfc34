// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration** - *Scan Behaviour Parameters*
//!
//! Compile-time constants controlling chunking thresholds, plus the runtime
//! [`ScanConfig`] builder that selects how a scan is split into chunks.
//! Every strategy produces the same result; they differ only in cost.

/// Byte alignment required before a chunk is handed to the SIMD tier.
///
/// Matches the allocation alignment of *Minarrow*'s `Vec64`.
pub const SIMD_ALIGNMENT: usize = 64;

/// Default number of elements per chunk for chunked and parallel scans.
pub const DEFAULT_CHUNK_LEN: usize = 64 * 1024;

/// Minimum element count before `ScanStrategy::Auto` fans out to worker
/// threads. Below this the thread hand-off costs more than the scan.
pub const PARALLEL_MIN_LEN: usize = 1 << 20;

/// How an array is partitioned before scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Pick `Parallel` for large inputs when the `parallel` feature is
    /// enabled, otherwise `Sequential`.
    #[default]
    Auto,
    /// One pass over the whole array.
    Sequential,
    /// Independent scans of `chunk_len` sized chunks, merged left to right
    /// on the calling thread.
    Chunked { chunk_len: usize },
    /// Chunks scanned on the rayon pool and merged in order
    /// (requires `parallel` feature).
    #[cfg(feature = "parallel")]
    Parallel { chunk_len: usize },
}

impl ScanStrategy {
    /// Chunk length carried by the strategy, if any.
    #[inline]
    pub fn chunk_len(&self) -> Option<usize> {
        match *self {
            ScanStrategy::Chunked { chunk_len } => Some(chunk_len),
            #[cfg(feature = "parallel")]
            ScanStrategy::Parallel { chunk_len } => Some(chunk_len),
            ScanStrategy::Auto | ScanStrategy::Sequential => None,
        }
    }
}

/// Configuration for `*_with` scans.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub strategy: ScanStrategy,
}

impl ScanConfig {
    /// Create a new config with default settings (automatic strategy)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strategy
    pub fn strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shorthand for `ScanStrategy::Chunked { chunk_len }`
    pub fn chunked(self, chunk_len: usize) -> Self {
        self.strategy(ScanStrategy::Chunked { chunk_len })
    }

    /// Shorthand for `ScanStrategy::Parallel { chunk_len }`
    #[cfg(feature = "parallel")]
    pub fn parallel(self, chunk_len: usize) -> Self {
        self.strategy(ScanStrategy::Parallel { chunk_len })
    }

    /// Resolves `Auto` against the input length. Explicit strategies are
    /// returned untouched.
    pub fn resolve(&self, len: usize) -> ScanStrategy {
        match self.strategy {
            ScanStrategy::Auto => {
                #[cfg(feature = "parallel")]
                {
                    if len >= PARALLEL_MIN_LEN {
                        return ScanStrategy::Parallel {
                            chunk_len: DEFAULT_CHUNK_LEN,
                        };
                    }
                }
                #[cfg(not(feature = "parallel"))]
                let _ = len;
                ScanStrategy::Sequential
            }
            other => other,
        }
    }
}
