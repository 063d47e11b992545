pub mod earningsdtos;
pub mod payoutdtos;
