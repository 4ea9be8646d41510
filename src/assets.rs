//! Static asset provider
//!
//! The packaged Swagger UI bundle (swagger-ui-dist 5.17.14) is compiled into
//! the binary from `assets/swagger-ui/`. Hosts can swap in their own provider,
//! for example to serve a patched bundle from disk.

use rust_embed::RustEmbed;
use std::borrow::Cow;

/// One file from a read-only asset collection
#[derive(Debug, Clone)]
pub struct Asset {
    pub data: Cow<'static, [u8]>,
    /// Modification time in seconds since the Unix epoch, if known
    pub last_modified: Option<u64>,
    /// SHA-256 of `data` when the provider already knows it
    pub sha256: Option<[u8; 32]>,
}

/// Read-only hierarchical file collection
pub trait AssetProvider: Send + Sync {
    /// Look up a file by its path relative to the collection root
    fn get(&self, path: &str) -> Option<Asset>;
}

#[derive(RustEmbed)]
#[folder = "assets/swagger-ui/"]
struct SwaggerUiDist;

/// The packaged Swagger UI bundle
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    /// Paths of every packaged file
    pub fn files() -> impl Iterator<Item = Cow<'static, str>> {
        SwaggerUiDist::iter()
    }
}

impl AssetProvider for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Asset> {
        let path = normalize(path)?;
        SwaggerUiDist::get(path).map(|file| Asset {
            last_modified: file.metadata.last_modified(),
            sha256: Some(file.metadata.sha256_hash()),
            data: file.data,
        })
    }
}

/// Strip leading slashes and refuse anything that climbs out of the root
fn normalize(path: &str) -> Option<&str> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.split('/').any(|seg| seg == ".." || seg == ".") {
        return None;
    }
    Some(path)
}
