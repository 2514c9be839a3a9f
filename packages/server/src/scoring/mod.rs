//! Pure decision and ranking logic: the round window gate and the
//! leaderboard ranker. Nothing here touches the database; callers supply
//! the rows and persist the results.

pub mod leaderboard;
pub mod window;
