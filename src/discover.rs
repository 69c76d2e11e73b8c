//! Candidate file discovery.

use crate::error::DiscoveryError;
use crate::source::FileSource;
use std::collections::BTreeSet;
use std::path::{Component, PathBuf};

/// Resolve the files to validate.
///
/// Each explicit input is used verbatim when it names an existing file and
/// is otherwise expanded as a glob relative to the source root. With no
/// inputs, `defaults` are expanded instead. The result is sorted and free of
/// duplicates. An empty result is not an error.
pub fn discover(
    source: &dyn FileSource,
    inputs: &[String],
    defaults: &[String],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = BTreeSet::new();

    if inputs.is_empty() {
        for pattern in defaults {
            files.extend(source.expand(pattern)?.into_iter().map(clean));
        }
    } else {
        for input in inputs {
            let literal = clean(PathBuf::from(input));
            if source.is_file(&literal) {
                files.insert(literal);
                continue;
            }
            files.extend(source.expand(input)?.into_iter().map(clean));
        }
    }

    tracing::debug!(count = files.len(), "discovered candidate files");
    Ok(files.into_iter().collect())
}

/// Drops `.` components so `./a.yml` and `a.yml` deduplicate.
fn clean(path: PathBuf) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
