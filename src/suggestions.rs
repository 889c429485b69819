//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repo_scaffold::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Declaration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::declaration_not_found(path));
//! ```

use std::path::{Path, PathBuf};

/// Generate an error for when the declaration file is not found.
///
/// Includes hints about:
/// - Creating a declaration file
/// - Using the -d/--declaration flag
/// - Using the SCAFFOLD_DECLARATION environment variable
pub fn declaration_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Declaration file not found: {path}\n\n\
         hint: Create a .scaffold.yaml file in your repository root\n\
         hint: Use -d/--declaration to specify a different path\n\
         hint: Set SCAFFOLD_DECLARATION environment variable",
        path = path.display()
    )
}

/// Generate an error for when `check` finds artifacts that would change.
pub fn artifacts_out_of_date(paths: &[PathBuf]) -> anyhow::Error {
    let listed = paths
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::anyhow!(
        "{count} generated artifact(s) are out of date:\n{listed}\n\n\
         hint: Run 'repo-scaffold generate' and commit the result",
        count = paths.len()
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub(crate) fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
