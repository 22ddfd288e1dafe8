pub mod mapping;

/// Presale pool lifecycle. Only ever advances `Initialized → Launched → Ended`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
pub enum PoolStatus {
    Initialized,
    Launched,
    Ended,
}

impl PoolStatus {
    pub fn rank(self) -> u8 {
        match self {
            Self::Initialized => 0,
            Self::Launched => 1,
            Self::Ended => 2,
        }
    }

    /// True when moving from `current` to `self` is a forward transition.
    ///
    /// Informational only: projections are applied in delivery order and do not
    /// consult the stored status.
    pub fn is_forward_of(self, current: PoolStatus) -> bool {
        self.rank() > current.rank()
    }
}
