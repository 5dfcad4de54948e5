//! Test helpers for writing CLI inputs into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use lovetrip_core::{PlanRequest, test_support::seoul_places};
use tempfile::TempDir;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// A plan request over the Seoul fixture places without a start point.
pub(super) fn seoul_request(by_region: bool) -> PlanRequest {
    PlanRequest {
        start: None,
        places: seoul_places(),
        by_region,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &PlanRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

#[cfg(feature = "store-sqlite")]
pub(super) fn write_seoul_database(path: &Utf8Path) {
    let rows: Vec<_> = seoul_places().into_iter().zip([1, 0, 9, 4]).collect();
    lovetrip_core::test_support::write_places_database(path.as_std_path(), &rows)
        .expect("persist places database");
}
