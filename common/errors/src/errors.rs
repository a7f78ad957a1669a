#![no_std]

pub static ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_INVALID_PAYMENT_TOKEN: &[u8] = b"Payment token is not accepted by this endpoint.";

pub static ERROR_BELOW_BORROW_THRESHOLD: &[u8] =
    b"Collateral ratio would fall below the borrow threshold.";

pub static ERROR_NOT_LIQUIDATABLE: &[u8] =
    b"Collateral ratio is not below the liquidation threshold.";

pub static ERROR_NO_POSITION: &[u8] = b"Account has no collateral in its position.";

pub static ERROR_INSUFFICIENT_COLLATERAL: &[u8] = b"Not enough collateral deposited for this account.";

pub static ERROR_NOTHING_TO_CLAIM: &[u8] = b"No refundable balance for this account.";

pub static ERROR_INVALID_THRESHOLDS: &[u8] =
    b"Invalid thresholds, liquidation threshold has to be positive and lower than the borrow threshold.";

pub static ERROR_INVALID_FEE: &[u8] = b"Invalid fee, has to be at most 100%.";

pub static ERROR_INVALID_CONVERSION_PATH: &[u8] =
    b"Invalid conversion path, has to start with the collateral token and end with the reserve token.";

pub static ERROR_INVALID_DECIMALS: &[u8] = b"Invalid token decimals.";

pub static ERROR_INVALID_TOKEN: &[u8] = b"Invalid token identifier.";

pub static ERROR_INVALID_ADDRESS: &[u8] = b"Invalid address provided.";

pub static ERROR_SWAP_OUTPUT_TOO_LOW: &[u8] = b"Swap output is lower than the requested minimum.";

pub static ERROR_UNKNOWN_PAIR: &[u8] = b"No rate configured for this pair.";
