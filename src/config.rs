//! Search configuration parameters.

/// Configuration for the alpha-beta search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBetaConfig {
    /// Plies searched below each root move.
    pub depth: u32,

    /// Stop examining siblings once `beta <= alpha`.
    /// Disabling it gives plain minimax with the same result and more nodes.
    pub pruning: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            pruning: true,
        }
    }
}

impl AlphaBetaConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            depth: 1,
            pruning: true,
        }
    }

    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: enable or disable pruning.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

/// Whose point of view a rollout result is credited from during backpropagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// Each node counts a win when the player who moved into it won, so every
    /// parent picks children that are good for itself.
    Mover,
    /// Every node counts a win when the player at the root won.
    Root,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate rounds per search.
    pub rollouts: u32,

    /// Exploration constant `C` of the UCT formula.
    pub exploration: f64,

    /// Reward attribution used during backpropagation.
    pub reward: Reward,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            rollouts: 2000,
            exploration: 1.414,
            reward: Reward::Mover,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            rollouts: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of rollouts.
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts = rollouts;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set reward attribution.
    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.reward = reward;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let ab = AlphaBetaConfig::default();
        assert_eq!(ab.depth, 2);
        assert!(ab.pruning);

        let mcts = MctsConfig::default();
        assert_eq!(mcts.rollouts, 2000);
        assert!((mcts.exploration - 1.414).abs() < 1e-9);
        assert_eq!(mcts.reward, Reward::Mover);
    }

    #[test]
    fn test_builder_pattern() {
        let ab = AlphaBetaConfig::default().with_depth(4).with_pruning(false);
        assert_eq!(ab, AlphaBetaConfig { depth: 4, pruning: false });

        let mcts = MctsConfig::for_testing()
            .with_rollouts(50)
            .with_exploration(0.5)
            .with_reward(Reward::Root);
        assert_eq!(mcts.rollouts, 50);
        assert!((mcts.exploration - 0.5).abs() < 1e-9);
        assert_eq!(mcts.reward, Reward::Root);
    }
}
