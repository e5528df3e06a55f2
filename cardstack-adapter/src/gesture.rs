use core::ops::BitOr;

use cardstack::Offset;

/// The direction of a committed swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 1 << 1,
            Self::Up => 1 << 2,
            Self::Down => 1 << 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The set of swipe directions a stack listens for.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeDirections(u8);

impl SwipeDirections {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(0b0011);
    pub const VERTICAL: Self = Self(0b1100);
    pub const ALL: Self = Self(0b1111);

    pub fn contains(self, direction: SwipeDirection) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn with(self, direction: SwipeDirection) -> Self {
        Self(self.0 | direction.bit())
    }

    pub fn without(self, direction: SwipeDirection) -> Self {
        Self(self.0 & !direction.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = SwipeDirection> {
        SwipeDirection::ALL
            .into_iter()
            .filter(move |d| self.contains(*d))
    }
}

impl Default for SwipeDirections {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

impl From<SwipeDirection> for SwipeDirections {
    fn from(direction: SwipeDirection) -> Self {
        Self::NONE.with(direction)
    }
}

impl BitOr for SwipeDirections {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<SwipeDirection> for SwipeDirections {
    type Output = Self;

    fn bitor(self, rhs: SwipeDirection) -> Self {
        self.with(rhs)
    }
}

impl FromIterator<SwipeDirection> for SwipeDirections {
    fn from_iter<T: IntoIterator<Item = SwipeDirection>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl core::fmt::Debug for SwipeDirections {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// How far a card must travel before a release commits the swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdConfig {
    /// A fraction of the card extent along the swipe axis.
    Fractional(f32),
    /// An absolute distance in pixels.
    Fixed(f32),
}

impl ThresholdConfig {
    /// The commit distance for a card spanning `extent` pixels along the swipe axis.
    pub fn distance(self, extent: f32) -> f32 {
        match self {
            Self::Fractional(fraction) => extent * fraction,
            Self::Fixed(px) => px,
        }
    }
}

/// Thresholds handed to the gesture recognizer.
///
/// The stack itself never evaluates these: swipe commitment happens in the recognizer, which
/// then reports the direction through [`DragObserver::on_swiped`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeThresholds {
    pub horizontal: ThresholdConfig,
    pub vertical: ThresholdConfig,
    /// Release velocity that commits a swipe regardless of distance.
    pub velocity_threshold: f32,
}

impl SwipeThresholds {
    pub fn threshold(&self, orientation: Orientation) -> ThresholdConfig {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }

    /// Builds thresholds from a per-orientation function.
    pub fn from_fn(
        threshold: impl Fn(Orientation) -> ThresholdConfig,
        velocity_threshold: f32,
    ) -> Self {
        Self {
            horizontal: threshold(Orientation::Horizontal),
            vertical: threshold(Orientation::Vertical),
            velocity_threshold,
        }
    }
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            horizontal: ThresholdConfig::Fractional(0.3),
            vertical: ThresholdConfig::Fractional(0.3),
            velocity_threshold: 125.0,
        }
    }
}

/// What a gesture recognizer reports to the stack.
///
/// Any recognizer that can deliver drag snapshots and committed swipes can drive a stack through
/// this trait.
pub trait DragObserver {
    /// The front card moved; `rotation` is in degrees.
    fn on_drag(&self, offset: Offset, rotation: f32);

    /// The drag ended without committing a swipe.
    fn on_drag_cancelled(&self);

    /// A swipe was committed in `direction`.
    fn on_swiped(&self, direction: SwipeDirection);
}
