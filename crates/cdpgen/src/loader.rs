//! Loading and merging schema documents.

use crate::error::{GenError, GenResult};
use crate::schema::Protocol;
use std::path::Path;
use tracing::{debug, info};

/// Read and decode one schema document.
pub fn load_file(path: impl AsRef<Path>) -> GenResult<Protocol> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading schema");

    let bytes = std::fs::read(path)?;
    parse(&path.display().to_string(), &bytes)
}

/// Decode one schema document; `source_name` is used in error messages.
pub fn parse(source_name: &str, bytes: &[u8]) -> GenResult<Protocol> {
    Protocol::from_json(bytes).map_err(|source| GenError::Parse {
        source_name: source_name.to_string(),
        source,
    })
}

/// Read every document and merge them into one protocol.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> GenResult<Protocol> {
    let documents = paths.iter().map(load_file).collect::<GenResult<Vec<_>>>()?;
    let protocol = merge(documents)?;

    info!(
        documents = paths.len(),
        domains = protocol.domains.len(),
        "Loaded protocol"
    );
    Ok(protocol)
}

/// Concatenate the domains of every document and sort them by name.
///
/// The sort is stable and the result does not depend on document order.
/// Two domains with the same name are rejected.
pub fn merge(documents: impl IntoIterator<Item = Protocol>) -> GenResult<Protocol> {
    let mut domains: Vec<_> = documents.into_iter().flat_map(|p| p.domains).collect();
    domains.sort_by(|a, b| a.domain.cmp(&b.domain));

    if let Some(pair) = domains.windows(2).find(|w| w[0].domain == w[1].domain) {
        return Err(GenError::DuplicateDomain(pair[0].domain.clone()));
    }

    Ok(Protocol { domains })
}
