pub mod affiliatemodel;
pub mod earningmodel;
pub mod payoutmodel;
