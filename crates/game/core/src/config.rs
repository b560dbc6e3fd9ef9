/// Rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Cups in a full rack. Every rack starts here and is clamped to
    /// `0..=rack_size`.
    pub rack_size: u32,

    /// Attempt quota for a turn whose offense has no lineup configured.
    pub default_lineup_size: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RACK_SIZE: u32 = 100;
    pub const DEFAULT_LINEUP_SIZE: u32 = 6;

    pub fn new() -> Self {
        Self {
            rack_size: Self::DEFAULT_RACK_SIZE,
            default_lineup_size: Self::DEFAULT_LINEUP_SIZE,
        }
    }

    pub fn with_rack_size(mut self, rack_size: u32) -> Self {
        self.rack_size = rack_size;
        self
    }

    /// Zero is bumped to one so an unconfigured turn can still end.
    pub fn with_default_lineup_size(mut self, default_lineup_size: u32) -> Self {
        self.default_lineup_size = default_lineup_size.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
