//! Deferred body destruction
//!
//! Bodies replaced or released by a [`RigidBody`](crate::rigid_body::RigidBody)
//! are not destroyed on the spot: a script may be running inside a callback
//! that still walks the engine's body set. They wait here until the owner of
//! the step loop drains the list between steps.

use crate::backend::PhysicsBackend;
use crate::body::BodyRef;
use crate::error::{PhysicsError, Result};
use std::collections::{HashSet, VecDeque};

/// FIFO of bodies pending destruction. A body is queued at most once.
#[derive(Debug, Default)]
pub struct DisposalList {
    queue: VecDeque<BodyRef>,
    queued: HashSet<BodyRef>,
}

impl DisposalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body. Fails if it is already waiting.
    pub fn push(&mut self, body: BodyRef) -> Result<()> {
        if !self.queued.insert(body) {
            return Err(PhysicsError::AlreadyQueued(body));
        }
        self.queue.push_back(body);
        Ok(())
    }

    pub fn contains(&self, body: BodyRef) -> bool {
        self.queued.contains(&body)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending bodies in queue order
    pub fn iter(&self) -> impl Iterator<Item = &BodyRef> {
        self.queue.iter()
    }

    /// Destroy every queued body through the backend, oldest first.
    ///
    /// Returns the bodies the backend actually destroyed. A body the backend
    /// no longer knows is logged and dropped from the list.
    pub fn drain(&mut self, backend: &mut dyn PhysicsBackend) -> Vec<BodyRef> {
        let mut destroyed = Vec::with_capacity(self.queue.len());
        while let Some(body) = self.queue.pop_front() {
            self.queued.remove(&body);
            match backend.destroy_body(body) {
                Ok(()) => destroyed.push(body),
                Err(e) => log::error!("Failed to dispose {:?}: {}", body, e),
            }
        }
        if !destroyed.is_empty() {
            log::trace!("Disposed {} rigid bodies", destroyed.len());
        }
        destroyed
    }
}
