/// Simulator configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulatorConfig {
    /// Base seed for container rolls.
    ///
    /// Combined with the request nonce so that replaying the same request
    /// sequence from the same seed yields the same drops.
    pub seed: u64,

    /// Wear added to an applied sticker by one scrape.
    pub sticker_wear_step: f32,

    /// Longest name (in characters) a name tag may carry.
    pub max_name_tag_length: usize,
}

impl SimulatorConfig {
    // ===== compile-time constants used as array lengths =====
    pub const MAX_STICKER_SLOTS: usize = 5;
    pub const MAX_PATCH_SLOTS: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0;
    pub const DEFAULT_STICKER_WEAR_STEP: f32 = 0.12;
    pub const DEFAULT_MAX_NAME_TAG_LENGTH: usize = 20;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            sticker_wear_step: Self::DEFAULT_STICKER_WEAR_STEP,
            max_name_tag_length: Self::DEFAULT_MAX_NAME_TAG_LENGTH,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
