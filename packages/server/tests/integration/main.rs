mod common;

mod criteria;
mod rounds;
mod scores;
mod submissions;
