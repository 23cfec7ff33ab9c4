pub mod balance;
pub mod constants;
pub mod game_state;
pub mod rewards;
