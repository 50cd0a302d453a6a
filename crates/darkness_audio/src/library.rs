//! Sound library: the fixed sets of files each cue picks from

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Interchangeable sound files for one cue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CueSet {
    files: Vec<String>,
}

impl CueSet {
    /// Create a cue set from file identifiers
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Cue set with a single file
    pub fn single(file: impl Into<String>) -> Self {
        Self {
            files: vec![file.into()],
        }
    }

    /// All files in the set
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Whether a file belongs to this set
    pub fn contains(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pick a file uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.files.choose(rng).map(String::as_str)
    }
}

/// Every sound the experience can play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundLibrary {
    /// Punctuated breathing from the zombie (one-shot)
    pub breathing: CueSet,
    /// Zombie footsteps (looped)
    pub footsteps: CueSet,
    /// Zombie death scream, played when it is shot
    pub zombie_death: CueSet,
    /// Ambient water drops scattered around the room
    pub water_drops: CueSet,
    /// Weapon discharge on every trigger pull
    pub weapon: CueSet,
    /// Played at the zombie when it reaches the viewer
    pub player_death: CueSet,
    /// Looped background bed started with the scene
    pub background: Option<String>,
}

impl Default for SoundLibrary {
    fn default() -> Self {
        Self {
            breathing: CueSet::new([
                "zombie/breathing_1.wav",
                "zombie/breathing_2.wav",
                "zombie/breathing_3.wav",
            ]),
            footsteps: CueSet::new(["zombie/footsteps_1.wav", "zombie/footsteps_2.wav"]),
            zombie_death: CueSet::new([
                "zombie/death_1.wav",
                "zombie/death_2.wav",
                "zombie/death_3.wav",
            ]),
            water_drops: CueSet::new([
                "water/water_drops_1.wav",
                "water/water_drops_2.wav",
                "water/water_drops_3.wav",
                "water/water_drops_4.wav",
            ]),
            weapon: CueSet::single("handgun_shot.wav"),
            player_death: CueSet::single("player_dead.wav"),
            background: Some("background.mp3".to_string()),
        }
    }
}

impl SoundLibrary {
    /// Files a zombie may need during its life, for warming the engine cache
    pub fn zombie_files(&self) -> impl Iterator<Item = &str> {
        self.breathing
            .files()
            .iter()
            .chain(self.footsteps.files())
            .chain(self.zombie_death.files())
            .map(String::as_str)
    }

    /// Named cue sets, for validation and diagnostics
    pub fn cue_sets(&self) -> [(&'static str, &CueSet); 6] {
        [
            ("breathing", &self.breathing),
            ("footsteps", &self.footsteps),
            ("zombie_death", &self.zombie_death),
            ("water_drops", &self.water_drops),
            ("weapon", &self.weapon),
            ("player_death", &self.player_death),
        ]
    }
}
