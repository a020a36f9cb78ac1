//! Action codes — the discrete animation tag carried by every snapshot.
//!
//! The scheduler sets a code each tick and transmits it verbatim; the
//! observer's pose driver is a pure function of (code, local time).  Codes
//! have a stable single-byte form so traces and foreign tools can read them.

/// Discrete animation/behavior state of an NPC.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCode {
    /// Standing still (breathing, looking around).
    #[default]
    Idle,
    /// Moving at walking pace.
    Walk,
    /// Moving at running pace.
    Run,
    /// Serving gesture (waving toward a customer).
    Serve,
    /// Cleaning gesture (wiping the counter).
    Clean,
    /// Custom emote slot `n` of the agent's emote table.
    Emote(u8),
}

impl ActionCode {
    /// First byte value used by `Emote` slots.
    pub const EMOTE_BASE: u8 = 16;

    /// Highest emote slot with a byte form.
    pub const MAX_EMOTE: u8 = u8::MAX - Self::EMOTE_BASE;

    /// `true` for codes produced by locomotion actions.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, ActionCode::Walk | ActionCode::Run)
    }

    /// `false` for an `Emote` slot above [`MAX_EMOTE`][Self::MAX_EMOTE],
    /// which has no byte form.
    #[inline]
    pub fn is_encodable(self) -> bool {
        !matches!(self, ActionCode::Emote(n) if n > Self::MAX_EMOTE)
    }

    /// Stable single-byte encoding.  Only meaningful for encodable codes;
    /// out-of-range emote slots saturate to `u8::MAX`.
    pub fn as_u8(self) -> u8 {
        match self {
            ActionCode::Idle     => 0,
            ActionCode::Walk     => 1,
            ActionCode::Run      => 2,
            ActionCode::Serve    => 3,
            ActionCode::Clean    => 4,
            ActionCode::Emote(n) => Self::EMOTE_BASE.saturating_add(n),
        }
    }

    /// Inverse of [`as_u8`][Self::as_u8].  Returns `None` for reserved values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ActionCode::Idle),
            1 => Some(ActionCode::Walk),
            2 => Some(ActionCode::Run),
            3 => Some(ActionCode::Serve),
            4 => Some(ActionCode::Clean),
            n if n >= Self::EMOTE_BASE => Some(ActionCode::Emote(n - Self::EMOTE_BASE)),
            _ => None,
        }
    }

    /// Human-readable label, used in CSV traces and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionCode::Idle     => "idle",
            ActionCode::Walk     => "walk",
            ActionCode::Run      => "run",
            ActionCode::Serve    => "serve",
            ActionCode::Clean    => "clean",
            ActionCode::Emote(_) => "emote",
        }
    }
}

impl std::fmt::Display for ActionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionCode::Emote(n) => write!(f, "emote-{n}"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl TryFrom<u8> for ActionCode {
    type Error = crate::NpcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(crate::NpcError::UnknownCode(value))
    }
}
