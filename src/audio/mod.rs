//! # Audio clip lookup library.
//!
//! [`AudioLibrary`] is a small registry of named [`AudioClip`] entries with
//! the lookup rules playback code expects: case-insensitive name matching,
//! bounds-checked index access, and uniform random selection. Clips are plain
//! data; actual playback belongs to whatever audio backend sits on top.
//!
//! ## Example
//! ```rust
//! use typebus::{AudioClip, AudioLibrary};
//!
//! let library = AudioLibrary::new(vec![
//!     AudioClip::new("Explosion", "sfx/explosion.ogg"),
//!     AudioClip::new("Coin", "sfx/coin.ogg"),
//! ]);
//!
//! assert!(library.clip("explosion").is_some()); // case-insensitive
//! assert!(library.clip("laser").is_none());
//! ```

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

/// Upper bound for [`AudioLibrary::pitch_variation`].
const MAX_PITCH_VARIATION: f32 = 0.5;

/// One named audio clip: a name, a source path, and optional per-clip
/// overrides of the library defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Lookup name; matching is case-insensitive.
    pub name: String,
    /// Source file path.
    pub path: PathBuf,
    /// Per-clip volume override (library default when `None`).
    pub volume: Option<f32>,
    /// Per-clip loop override (library default when `None`).
    pub looped: Option<bool>,
}

impl AudioClip {
    /// Creates a clip that uses the library defaults.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            volume: None,
            looped: None,
        }
    }

    /// Sets a per-clip volume override.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Sets a per-clip loop override.
    #[must_use]
    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = Some(looped);
        self
    }

    /// Source path of this clip.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered collection of clips plus playback defaults.
#[derive(Debug, Clone)]
pub struct AudioLibrary {
    clips: Vec<AudioClip>,
    default_volume: f32,
    default_loop: bool,
    pitch_variation: f32,
}

impl AudioLibrary {
    /// Creates a library over `clips` with default settings
    /// (volume 1.0, no looping, no pitch variation).
    #[must_use]
    pub fn new(clips: Vec<AudioClip>) -> Self {
        Self {
            clips,
            default_volume: 1.0,
            default_loop: false,
            pitch_variation: 0.0,
        }
    }

    /// Sets the default volume applied to clips without an override.
    #[must_use]
    pub fn with_default_volume(mut self, volume: f32) -> Self {
        self.default_volume = volume;
        self
    }

    /// Sets the default loop flag applied to clips without an override.
    #[must_use]
    pub fn with_default_loop(mut self, looped: bool) -> Self {
        self.default_loop = looped;
        self
    }

    /// Sets the random pitch variation range, clamped to `0.0..=0.5`.
    #[must_use]
    pub fn with_pitch_variation(mut self, variation: f32) -> Self {
        self.pitch_variation = variation.clamp(0.0, MAX_PITCH_VARIATION);
        self
    }

    /// Looks a clip up by name, case-insensitively. First match wins.
    ///
    /// A miss is logged and answered with `None`; callers decide whether a
    /// missing clip is worth more than skipping playback.
    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&AudioClip> {
        let found = self
            .clips
            .iter()
            .find(|clip| clip.name.eq_ignore_ascii_case(name));
        if found.is_none() {
            debug!(clip = name, "audio clip not found");
        }
        found
    }

    /// Returns the clip at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn clip_at(&self, index: usize) -> Option<&AudioClip> {
        self.clips.get(index)
    }

    /// Picks a clip uniformly at random; `None` when the library is empty.
    #[must_use]
    pub fn random_clip(&self) -> Option<&AudioClip> {
        if self.clips.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.clips.len());
        self.clips.get(index)
    }

    /// Effective volume for `clip`: its override, or the library default.
    #[must_use]
    pub fn volume_for(&self, clip: &AudioClip) -> f32 {
        clip.volume.unwrap_or(self.default_volume)
    }

    /// Effective loop flag for `clip`: its override, or the library default.
    #[must_use]
    pub fn looped_for(&self, clip: &AudioClip) -> bool {
        clip.looped.unwrap_or(self.default_loop)
    }

    /// Configured pitch variation range (`0.0..=0.5`).
    #[must_use]
    pub fn pitch_variation(&self) -> f32 {
        self.pitch_variation
    }

    /// Number of clips in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// True when the library holds no clips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl Default for AudioLibrary {
    /// An empty library with default settings.
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
