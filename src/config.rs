use serde::Deserialize;

/// Frames the renderer shows the board before the AI answers.
pub const DEFAULT_AI_DELAY_FRAMES: u32 = 10;

/// Host-supplied game settings. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks between a human move (or a "Player Pass") and the AI reply.
    /// Zero lets the AI answer on the next tick.
    pub ai_delay_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_delay_frames: DEFAULT_AI_DELAY_FRAMES,
        }
    }
}
