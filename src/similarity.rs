//! Longest-common-subsequence similarity between two DNA texts.
//!
//! The full `(|x|+1) x (|y|+1)` table is kept so a witness can be traced
//! back, which makes both time and memory O(|x|·|y|). Use [`lcs_length`] when
//! only the length is needed.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::emit;
use crate::text_source::{self, TextSourceError};

/// Errors that stop a file-based similarity analysis.
#[derive(thiserror::Error, Debug)]
pub enum SimilarityError {
    #[error(transparent)]
    Source(#[from] TextSourceError),
    #[error("{} contains no sequence", .0.display())]
    EmptyInput(PathBuf),
}

/// Length of an LCS together with one witness subsequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcs {
    pub length: usize,
    pub witness: Vec<u8>,
}

/// Outcome of [`analyse_files`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub lcs_length: usize,
    pub witness: String,
    pub similarity: f32,
    /// False when the witness file could not be written.
    pub witness_written: bool,
}

/// Compute an LCS of `x` and `y`.
///
/// The traceback starts from the last symbols, takes a match whenever the
/// symbols agree, and otherwise moves up (dropping a symbol of `x`) only if
/// that keeps a strictly longer LCS than moving left; ties move left. Equal
/// inputs therefore always produce the same witness.
pub fn lcs(x: &[u8], y: &[u8]) -> Lcs {
    let (m, n) = (x.len(), y.len());
    let width = n + 1;
    let mut table = vec![0u32; (m + 1) * width];

    for i in 0..m {
        for j in 0..n {
            table[(i + 1) * width + j + 1] = if x[i] == y[j] {
                table[i * width + j] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let length = table[m * width + n] as usize;
    let mut witness = Vec::with_capacity(length);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            witness.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[(i - 1) * width + j] > table[i * width + j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    witness.reverse();

    Lcs { length, witness }
}

/// LCS length in O(|y|) memory.
pub fn lcs_length(x: &[u8], y: &[u8]) -> usize {
    let mut prev = vec![0usize; y.len() + 1];
    let mut curr = vec![0usize; y.len() + 1];
    for &a in x {
        for (j, &b) in y.iter().enumerate() {
            curr[j + 1] = if a == b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[y.len()]
}

/// LCS length divided by the length of the longer input; 0 when both are empty.
pub fn similarity(x: &[u8], y: &[u8]) -> f32 {
    let longest = x.len().max(y.len());
    if longest == 0 {
        return 0.0;
    }
    lcs_length(x, y) as f32 / longest as f32
}

fn load_nonempty(path: &Path) -> Result<String, SimilarityError> {
    let text = text_source::load(path)?;
    if text.is_empty() {
        return Err(SimilarityError::EmptyInput(path.to_path_buf()));
    }
    Ok(text)
}

/// Compare the texts stored at `f1` and `f2` and write the witness to `f3`.
///
/// Failing to write `f3` is reported but does not fail the analysis.
pub fn analyse_files<P1, P2, P3>(f1: P1, f2: P2, f3: P3) -> Result<SimilarityReport, SimilarityError>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>,
{
    let x = load_nonempty(f1.as_ref())?;
    let y = load_nonempty(f2.as_ref())?;

    let result = lcs(x.as_bytes(), y.as_bytes());
    let similarity = result.length as f32 / x.len().max(y.len()) as f32;
    log::info!(
        "LCS of {} and {} symbols has length {} (similarity {:.4})",
        x.len(),
        y.len(),
        result.length,
        similarity
    );

    let witness_written = match emit::write_witness(f3.as_ref(), &result.witness) {
        Ok(()) => true,
        Err(error) => {
            log::error!("{error}");
            false
        }
    };

    Ok(SimilarityReport {
        lcs_length: result.length,
        witness: String::from_utf8_lossy(&result.witness).into_owned(),
        similarity,
        witness_written,
    })
}

/// Similarity ratio of the texts at `f1` and `f2`, writing an LCS to `f3`.
///
/// Returns 0 when either input is missing or empty.
pub fn similarity_analyser<P1, P2, P3>(f1: P1, f2: P2, f3: P3) -> f32
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>,
{
    match analyse_files(f1, f2, f3) {
        Ok(report) => report.similarity,
        Err(error) => {
            log::warn!("{error}");
            0.0
        }
    }
}
