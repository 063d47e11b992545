pub mod currency;
pub mod decimal;
