use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError, RwLock},
};

use crate::{
    assets::raster::Raster,
    config::meter::MeterGeometry,
    foundation::core::Rect,
    rotate::rotozoom::ImageRotator,
    sprites::factory::{ChannelRects, NeedleSprites, build_needle_sprites},
};

/// Name-keyed store of one kind of sequence.
///
/// Absence reads as an empty sequence. Stored sequences are shared, never mutated.
#[derive(Debug)]
pub struct SequenceCache<T> {
    entries: RwLock<HashMap<String, Arc<[T]>>>,
}

impl<T> Default for SequenceCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> SequenceCache<T> {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence stored for `name`, or an empty sequence.
    pub fn get(&self, name: &str) -> Arc<[T]> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Store `seq` under `name`, replacing any previous entry.
    pub fn put(&self, name: impl Into<String>, seq: impl Into<Arc<[T]>>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.into(), seq.into());
    }

    /// `true` when an entry exists for `name`, even an empty one.
    pub fn contains(&self, name: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(name)
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session-owned memo of needle animations, keyed by instrument name.
///
/// Holds one [`SequenceCache`] per sequence kind. The first request for a name builds it;
/// concurrent requests for the same name wait for that build and share its result.
/// Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct NeedleCache {
    sprites: SequenceCache<Raster>,
    mono_rects: SequenceCache<Rect>,
    left_rects: SequenceCache<Rect>,
    right_rects: SequenceCache<Rect>,
    inflight: Mutex<HashMap<String, Arc<OnceLock<NeedleSprites>>>>,
}

impl NeedleCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite sequences by instrument name.
    pub fn sprites(&self) -> &SequenceCache<Raster> {
        &self.sprites
    }

    /// Mono rectangle sequences by instrument name.
    pub fn mono_rects(&self) -> &SequenceCache<Rect> {
        &self.mono_rects
    }

    /// Left rectangle sequences by instrument name.
    pub fn left_rects(&self) -> &SequenceCache<Rect> {
        &self.left_rects
    }

    /// Right rectangle sequences by instrument name.
    pub fn right_rects(&self) -> &SequenceCache<Rect> {
        &self.right_rects
    }

    /// Previously built animation of `name`, if its sprite entry is non-empty.
    pub fn lookup(&self, name: &str) -> Option<NeedleSprites> {
        let sprites = self.sprites.get(name);
        if sprites.is_empty() {
            return None;
        }
        let rects = if self.mono_rects.contains(name) {
            ChannelRects::Mono(self.mono_rects.get(name))
        } else {
            ChannelRects::Stereo {
                left: self.left_rects.get(name),
                right: self.right_rects.get(name),
            }
        };
        Some(NeedleSprites { sprites, rects })
    }

    /// Return the animation of `name`, building it on first request.
    ///
    /// A non-empty cached entry short-circuits all work. Otherwise exactly one caller
    /// builds per name; the others block until it publishes.
    pub fn get_or_build(
        &self,
        name: &str,
        image: &Raster,
        geometry: &MeterGeometry,
        rotator: &dyn ImageRotator,
    ) -> NeedleSprites {
        if let Some(hit) = self.lookup(name) {
            tracing::debug!(name, frames = hit.len(), "needle cache hit");
            return hit;
        }

        let cell = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            inflight.entry(name.to_owned()).or_default().clone()
        };

        cell.get_or_init(|| {
            tracing::debug!(name, "needle cache miss, building");
            let built = build_needle_sprites(image, geometry, rotator);
            self.publish(name, &built);
            built
        })
        .clone()
    }

    fn publish(&self, name: &str, built: &NeedleSprites) {
        // A non-empty sprite entry marks the name as ready, so it goes in last.
        match &built.rects {
            ChannelRects::Mono(rects) => self.mono_rects.put(name, rects.clone()),
            ChannelRects::Stereo { left, right } => {
                self.left_rects.put(name, left.clone());
                self.right_rects.put(name, right.clone());
            }
        }
        self.sprites.put(name, built.sprites.clone());
        tracing::debug!(name, frames = built.len(), "needle sprites published");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprites/cache.rs"]
mod tests;
