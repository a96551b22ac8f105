//! Artifact loading
//!
//! The artifact is a shared library exporting [`REGISTER_SYMBOL`]. Loading
//! it makes its code live for the rest of the process; the `Library` handle
//! must outlive every handler entry taken from the manifest, so the handle
//! is kept inside [`Artifact`] alongside the manifest.

#![allow(unsafe_code)]

use std::path::{Path, PathBuf};

use invoke_bridge_abi::{HandlerManifest, HandlerType, RegisterFn, REGISTER_SYMBOL};
use libloading::{Library, Symbol};
use tracing::debug;

use crate::error::BridgeError;

/// A loaded handler artifact: the registered manifest plus the library
/// handle that keeps the registered closures valid.
#[derive(Debug)]
pub struct Artifact {
    manifest: HandlerManifest,
    path: PathBuf,
    // Dropped last; the manifest's closures point into this library.
    _lib: Library,
}

impl Artifact {
    /// Load the shared library at `path` and collect its handler manifest.
    ///
    /// The registration call runs under `catch_unwind`: a panic during
    /// registration is the artifact failing to construct itself, not a
    /// bridge bug.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        if !path.exists() {
            return Err(BridgeError::ArtifactNotFound {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        // SAFETY: loading and calling into the artifact is the bridge's
        // whole purpose. The artifact must export REGISTER_SYMBOL with the
        // RegisterFn signature and be built with the same toolchain.
        let (lib, register) = unsafe {
            let lib = Library::new(path).map_err(|e| BridgeError::ArtifactNotFound {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            let register = {
                let symbol: Symbol<'_, RegisterFn> = lib.get(REGISTER_SYMBOL).map_err(|e| {
                    BridgeError::InstantiationFailure(format!(
                        "artifact exports no registration symbol: {e}"
                    ))
                })?;
                *symbol
            };
            (lib, register)
        };

        let manifest = std::panic::catch_unwind(register).map_err(|_| {
            BridgeError::InstantiationFailure(format!(
                "registration panicked in artifact {}",
                path.display()
            ))
        })?;

        debug!(
            path = %path.display(),
            types = manifest.types().len(),
            "loaded artifact"
        );

        Ok(Self {
            manifest,
            path: path.to_path_buf(),
            _lib: lib,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a registered handler type by its fully qualified name.
    pub fn resolve_type(&self, type_name: &str) -> Result<&HandlerType, BridgeError> {
        self.manifest
            .get(type_name)
            .ok_or_else(|| BridgeError::TypeNotFound(type_name.to_string()))
    }
}
