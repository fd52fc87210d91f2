//! Player input intents
//!
//! The game never polls devices. A frontend translates key events into an
//! [`InputState`] and the session applies it to the player once per frame.

use arcade_engine::foundation::math::{Vec3, DOWN, LEFT, RIGHT, UP};

/// Movement keys the shooter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    /// Move up
    Up,
    /// Move down
    Down,
    /// Move left
    Left,
    /// Move right
    Right,
}

impl DirectionKey {
    /// Unit world direction for this key
    pub fn vector(self) -> Vec3 {
        match self {
            Self::Up => UP,
            Self::Down => DOWN,
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }
}

/// What the player wants to do this frame
///
/// Movement is single-direction: the most recently pressed key wins, and
/// releasing it falls back to the key that was held before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    current: Option<DirectionKey>,
    previous: Option<DirectionKey>,
    shooting: bool,
}

impl InputState {
    /// No movement, not shooting
    pub fn new() -> Self {
        Self::default()
    }

    /// A direction key went down
    pub fn press(&mut self, key: DirectionKey) {
        if self.current == Some(key) {
            return;
        }
        self.previous = self.current;
        self.current = Some(key);
    }

    /// A direction key went up
    pub fn release(&mut self, key: DirectionKey) {
        if self.current == Some(key) {
            self.current = self.previous.take();
        } else if self.previous == Some(key) {
            self.previous = None;
        }
    }

    /// Set whether the fire button is held
    pub fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    /// Check if the fire button is held
    pub fn is_shooting(&self) -> bool {
        self.shooting
    }

    /// Key currently steering the ship
    pub fn current(&self) -> Option<DirectionKey> {
        self.current
    }

    /// Movement direction (zero when no key is held)
    pub fn direction(&self) -> Vec3 {
        self.current.map_or_else(Vec3::zeros, DirectionKey::vector)
    }

    /// Drop every held key and stop shooting
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
