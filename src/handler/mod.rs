pub mod earnings;
pub mod payouts;
