/// This trait is used to control something that can return a score from a game state
///
/// The searchers only ever call [Scorable::score] on states where they stop expanding, either
/// because the game is over or because the ply bound was reached. Plain functions and closures
/// taking `&GameType` and returning an `f64` implement it, so any of the functions in
/// [crate::eval] can be used directly.
pub trait Scorable<GameType> {
    /// How desirable the given state is for the maximizing agent. Higher is better
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}
