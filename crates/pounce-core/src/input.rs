use serde::{Deserialize, Serialize};

/// Action state polled once per tick by the input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Ground pound request; treated as a press for this tick.
    pub pound: bool,
    /// Modifier selecting the high jump.
    pub high_jump: bool,
}

impl PlayerInput {
    /// -1 for left, +1 for right, 0 for neither. Left wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_takes_priority() {
        let input = PlayerInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.horizontal(), -1.0);
    }

    #[test]
    fn idle_is_zero() {
        assert_eq!(PlayerInput::default().horizontal(), 0.0);
    }
}
