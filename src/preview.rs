//! Revocable display handles for the image currently shown to the user.
//!
//! Every handle handed out is tracked until it is revoked, so a long-lived
//! controller can prove it is not accumulating stale previews.

use crate::constants::PREVIEW_URI_SCHEME;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    Source,
    Artifact,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: Uuid,
    kind: PreviewKind,
    uri: String,
}

impl PreviewHandle {
    fn new(kind: PreviewKind) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            kind,
            uri: format!("{}{}", PREVIEW_URI_SCHEME, id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> PreviewKind {
        self.kind
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: HashMap<Uuid, PreviewKind>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, kind: PreviewKind) -> PreviewHandle {
        let handle = PreviewHandle::new(kind);
        self.live.insert(handle.id, kind);
        handle
    }

    pub fn revoke_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        count
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live.contains_key(&handle.id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
