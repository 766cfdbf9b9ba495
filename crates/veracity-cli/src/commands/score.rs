//! Score command implementation.

use crate::error::Result;
use crate::output::Formatter;
use std::fmt;
use veracity_domain::traits::KeyValueStorage;
use veracity_store::ScoreStore;

/// Execute the score command.
pub fn execute_score<S>(scores: &ScoreStore<S>, formatter: &Formatter) -> Result<()>
where
    S: KeyValueStorage,
    S::Error: fmt::Display,
{
    println!("{}", formatter.format_score(scores.score())?);
    Ok(())
}
