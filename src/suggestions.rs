//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cocos_components::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Component not found: {}", name);
//!
//! // Use:
//! return Err(suggestions::component_not_found(name, registry.names()));
//! ```

use std::path::Path;

/// Generate an error for a project without `.cocos-components.yaml`.
pub fn project_not_initialized(project_dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Project is not initialized: {path}\n\n\
         hint: Run 'cocos-components init --repository <URL>' in the project root\n\
         hint: Use --project to point at a different project directory",
        path = project_dir.display()
    )
}

/// Generate an error for a project config that names no library at all.
pub fn library_not_configured() -> anyhow::Error {
    anyhow::anyhow!(
        "No component library configured\n\n\
         hint: Set 'repository' or 'library_path' in .cocos-components.yaml\n\
         hint: Run 'cocos-components init' to reconfigure the project"
    )
}

/// Generate an error for a configured library that has not been fetched.
pub fn library_missing(library_root: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Component library not found at {path}\n\n\
         hint: Run 'cocos-components update' to fetch the library",
        path = library_root.display()
    )
}

/// Generate an error for an empty registry.
pub fn registry_empty(library_root: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "The component library at {path} has no components\n\n\
         hint: Check that components/registry.json exists and lists components\n\
         hint: Run 'cocos-components update' to fetch the latest library",
        path = library_root.display()
    )
}

/// Generate an error for a directory that is not a Cocos Creator project.
pub fn not_a_cocos_project(project_dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Not a Cocos Creator project: {path}\n\n\
         hint: Run this command in a directory containing assets/, settings/ and package.json\n\
         hint: Use --skip-project-check to initialize anyway",
        path = project_dir.display()
    )
}

/// Generate an error for a component name missing from the registry.
///
/// Suggests the closest registered name when one is within a small edit
/// distance.
pub fn component_not_found<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> anyhow::Error {
    let candidates: Vec<&str> = candidates.into_iter().collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Component not found: {name}{did_you_mean}\n\n\
         hint: Run 'cocos-components list' to see available components\n\
         hint: Component names are case-sensitive"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
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

    // Two rolling rows instead of the full matrix
    let mut previous: Vec<usize> = (0..=b_len).collect();
    let mut current = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        current[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_len]
}
