use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No words of the required length")]
    EmptyWordList,
    #[error("Word length must be even to split into halves")]
    UnsplittableWordLen,
    #[error("Round words must all share one length")]
    MixedWordLengths,
    #[error("Too many words for one round")]
    TooManyWords,
    #[error("Invalid tile index")]
    InvalidTile,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Match already decided, no further rounds are scored")]
    MatchDecided,
    #[error("No player holds the turn")]
    NoTurnHolder,
    #[error("Countdown is already running")]
    TimerAlreadyRunning,
    #[error("Countdown has not been started")]
    TimerNotRunning,
    #[error("No round in progress")]
    NoActiveRound,
}

pub type Result<T> = core::result::Result<T, GameError>;
