// ==========================================
// TRACK LIST MODULE
// ==========================================
// This module holds the static playlist a transport cycles through.
// It handles:
// - Describing a single track (song or background video)
// - Keeping the list non-empty
// - Circular next/previous index arithmetic
// - The shuffle-keep-first view used by the video carousel
//
// The underlying tracks never change after construction. Shuffling only
// rewrites `order`, a permutation of indices into `tracks`, so the
// configured order can always be restored.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TrackListError;

// ==========================================
// TRACK STRUCT
// ==========================================
// A single song or video as it appears in the static configuration.
//
// src and cover are URIs relative to the asset root, e.g.
// "/music/Imogen Heap - Headlock.flac".
// duration is optional: songs get theirs from the decoder, background
// videos rely on it because the clock element has nothing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, src: impl Into<String>) -> Self {
        Track {
            id: id.into(),
            title: title.into(),
            artist: None,
            src: src.into(),
            cover: None,
            duration: None,
        }
    }

    /// Builds a track whose title is the file stem of `src`.
    /// Background videos carry no metadata beyond their path.
    pub fn from_src(id: impl Into<String>, src: impl Into<String>) -> Self {
        let src = src.into();
        let title = Path::new(&src)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| src.clone());
        Track::new(id, title, src)
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

// ==========================================
// SHUFFLE-KEEP-FIRST
// ==========================================
// Fisher-Yates over everything except element 0.
// Lists of length 0 or 1 are left untouched.
pub fn shuffle_keep_first<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    if items.len() <= 1 {
        return;
    }
    items[1..].shuffle(rng);
}

// ==========================================
// TRACK LIST STRUCT
// ==========================================
// Invariant: never empty, and `order` is always a permutation of
// 0..tracks.len() with order[0] == 0.
#[derive(Debug, Clone)]
pub struct TrackList {
    tracks: Vec<Track>,
    order: Vec<usize>,
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Result<Self, TrackListError> {
        if tracks.is_empty() {
            return Err(TrackListError::Empty);
        }
        let order = (0..tracks.len()).collect();
        Ok(TrackList { tracks, order })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    // Always false, kept so len() has its usual companion.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at a position in the active (possibly shuffled) order.
    /// The index wraps, so any usize is valid.
    pub fn get(&self, index: usize) -> &Track {
        let slot = index % self.order.len();
        &self.tracks[self.order[slot]]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.len();
        (index % len + len - 1) % len
    }

    /// Tracks in the active order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.order.iter().map(move |&i| &self.tracks[i])
    }

    // ==========================================
    // SHUFFLE: reshuffle()
    // ==========================================
    // Each call starts again from the configured order, so repeated
    // reshuffles are independent of each other.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = (0..self.tracks.len()).collect();
        shuffle_keep_first(&mut self.order, rng);
        tracing::debug!(order = ?self.order, "track list reshuffled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> TrackList {
        TrackList::new(vec![
            Track::new("a", "A", "/music/a.mp3"),
            Track::new("b", "B", "/music/b.mp3"),
            Track::new("c", "C", "/music/c.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(TrackList::new(Vec::new()).unwrap_err(), TrackListError::Empty);
    }

    #[test]
    fn next_index_cycles_through_every_slot() {
        let list = abc();
        for start in 0..list.len() {
            let mut seen = Vec::new();
            let mut index = start;
            for _ in 0..list.len() {
                index = list.next_index(index);
                seen.push(index);
            }
            assert_eq!(index, start);
            seen.sort_unstable();
            assert_eq!(seen, vec![0, 1, 2]);
        }
    }

    #[test]
    fn previous_index_wraps_from_zero_to_last() {
        let list = abc();
        assert_eq!(list.previous_index(0), 2);
        assert_eq!(list.previous_index(2), 1);
    }

    #[test]
    fn single_track_list_wraps_onto_itself() {
        let list = TrackList::new(vec![Track::new("a", "A", "/a")]).unwrap();
        assert_eq!(list.next_index(0), 0);
        assert_eq!(list.previous_index(0), 0);
    }

    #[test]
    fn get_wraps_out_of_range_indices() {
        let list = abc();
        assert_eq!(list.get(4).id, "b");
    }

    #[test]
    fn shuffle_keeps_first_and_permutes_the_rest() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 2..12 {
            let original: Vec<usize> = (0..len).collect();
            for _ in 0..20 {
                let mut items = original.clone();
                shuffle_keep_first(&mut items, &mut rng);
                assert_eq!(items[0], 0);
                let mut sorted = items.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, original);
            }
        }
    }

    #[test]
    fn reshuffle_pins_the_first_track() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut list = TrackList::new(
            (0..8)
                .map(|i| Track::from_src(i.to_string(), format!("/videos/{i}.mp4")))
                .collect(),
        )
        .unwrap();
        for _ in 0..10 {
            list.reshuffle(&mut rng);
            assert_eq!(list.get(0).id, "0");
            let mut ids: Vec<String> = list.iter().map(|t| t.id.clone()).collect();
            ids.sort();
            let mut expected: Vec<String> = (0..8).map(|i| i.to_string()).collect();
            expected.sort();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn from_src_uses_file_stem_as_title() {
        let track = Track::from_src("0", "/videos/IVOXYGEN - the girl next door.webm");
        assert_eq!(track.title, "IVOXYGEN - the girl next door");
    }

    #[test]
    fn track_deserializes_with_optional_fields_missing() {
        let track: Track =
            serde_json::from_str(r#"{"id":"4","title":"Headlock","src":"/music/h.flac"}"#).unwrap();
        assert_eq!(track.artist, None);
        assert_eq!(track.duration, None);
    }
}
