//! Amount and name checks shared by ledger operations and snapshot loading.

/// Returns `true` for amounts the ledger accepts: finite and not negative.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Returns `true` when `name` has visible characters.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}
