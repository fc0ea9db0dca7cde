pub mod output;
pub mod rank;
pub mod session;
