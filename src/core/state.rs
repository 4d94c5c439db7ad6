use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum GameState {
    #[default]
    AssetLoading,
    // the terrain is built on entering this state, then it moves straight on to InGame
    Generating,
    InGame,
}
