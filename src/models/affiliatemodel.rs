// models/affiliatemodel.rs
use std::{fmt, str::FromStr, sync::LazyLock};

use bigdecimal::BigDecimal;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MINIMUM_PAYOUT: i64 = 1000;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Bkash,
    Nagad,
    Rocket,
    Binance,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Bkash,
        PaymentMethod::Nagad,
        PaymentMethod::Rocket,
        PaymentMethod::Binance,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Bkash => "bkash",
            PaymentMethod::Nagad => "nagad",
            PaymentMethod::Rocket => "rocket",
            PaymentMethod::Binance => "binance",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn is_mobile_wallet(&self) -> bool {
        matches!(self, PaymentMethod::Bkash | PaymentMethod::Nagad | PaymentMethod::Rocket)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted)
            .ok_or_else(|| format!("Unsupported payment method: {}", s.trim()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WalletAccountType {
    #[default]
    Personal,
    Agent,
    Merchant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobileWalletDetails {
    pub phone_number: String,
    #[serde(default)]
    pub account_type: WalletAccountType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BinanceDetails {
    pub wallet_address: String,
    #[serde(default)]
    pub network: Option<String>, // TRC20, BEP20, ...
    #[serde(default)]
    pub binance_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferDetails {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub routing_number: Option<String>,
}

/// Method-specific payout details. The tag doubles as the payment method.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    Bkash(MobileWalletDetails),
    Nagad(MobileWalletDetails),
    Rocket(MobileWalletDetails),
    Binance(BinanceDetails),
    BankTransfer(BankTransferDetails),
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Bkash(_) => PaymentMethod::Bkash,
            PaymentDetails::Nagad(_) => PaymentMethod::Nagad,
            PaymentDetails::Rocket(_) => PaymentMethod::Rocket,
            PaymentDetails::Binance(_) => PaymentMethod::Binance,
            PaymentDetails::BankTransfer(_) => PaymentMethod::BankTransfer,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            PaymentDetails::Bkash(wallet)
            | PaymentDetails::Nagad(wallet)
            | PaymentDetails::Rocket(wallet) => validate_mobile_number(&wallet.phone_number),
            PaymentDetails::Binance(binance) => validate_wallet_address(&binance.wallet_address),
            PaymentDetails::BankTransfer(bank) => {
                if bank.bank_name.trim().is_empty() {
                    return Err("Bank name is required".to_string());
                }
                if bank.account_name.trim().is_empty() {
                    return Err("Account name is required".to_string());
                }
                validate_bank_account_number(&bank.account_number)
            }
        }
    }

    /// Complete details are what make a method usable for payouts.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

// Bangladeshi mobile numbers: 01[3-9]XXXXXXXX, optionally prefixed by 88 or +88
static MOBILE_NUMBER_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\+?88)?01[3-9][0-9]{8}$").ok());

fn validate_mobile_number(phone_number: &str) -> Result<(), String> {
    let cleaned: String = phone_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    let phone_regex = MOBILE_NUMBER_REGEX
        .as_ref()
        .ok_or_else(|| "Invalid phone regex".to_string())?;

    if !phone_regex.is_match(&cleaned) {
        return Err("Invalid Bangladeshi mobile number".to_string());
    }

    Ok(())
}

fn validate_wallet_address(address: &str) -> Result<(), String> {
    let address = address.trim();

    if !(26..=64).contains(&address.len()) {
        return Err("Invalid wallet address length".to_string());
    }

    if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Invalid wallet address format".to_string());
    }

    Ok(())
}

fn validate_bank_account_number(account_number: &str) -> Result<(), String> {
    let account_number = account_number.trim();
    if (8..=20).contains(&account_number.len()) && account_number.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Account number must be 8 to 20 digits".to_string())
    }
}

fn default_minimum_payout() -> BigDecimal {
    BigDecimal::from(DEFAULT_MINIMUM_PAYOUT)
}

/// Affiliate configuration as handed over by the account service.
///
/// `payment` holds the one current payout method; replacing it is the only
/// way to switch methods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateAccount {
    pub affiliate_id: String,
    #[serde(default)]
    pub commission_rate: BigDecimal,
    #[serde(default)]
    pub deposit_rate: BigDecimal,
    #[serde(default)]
    pub cpa_rate: BigDecimal,
    #[serde(default = "default_minimum_payout")]
    pub minimum_payout: BigDecimal,
    #[serde(default)]
    pub payment: Option<PaymentDetails>,
}

impl AffiliateAccount {
    pub fn new(affiliate_id: impl Into<String>) -> Self {
        Self {
            affiliate_id: affiliate_id.into(),
            commission_rate: BigDecimal::default(),
            deposit_rate: BigDecimal::default(),
            cpa_rate: BigDecimal::default(),
            minimum_payout: default_minimum_payout(),
            payment: None,
        }
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment.as_ref().map(PaymentDetails::method)
    }

    /// Replaces the current payout method, returning the previous one.
    pub fn set_payment(&mut self, details: PaymentDetails) -> Option<PaymentDetails> {
        self.payment.replace(details)
    }

    /// Methods a payout can be sent to right now.
    pub fn configured_methods(&self) -> Vec<PaymentMethod> {
        self.payment
            .iter()
            .filter(|details| details.is_complete())
            .map(PaymentDetails::method)
            .collect()
    }
}
