pub mod auth;
pub mod criteria;
pub mod leaderboard;
pub mod problem;
pub mod round;
pub mod score;
pub mod shared;
pub mod submission;
pub mod team;
