use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed balance for account {key}: field `{field}` {reason}")]
    MalformedBalance {
        key: String,
        field: String,
        reason: String,
    },

    #[error("total weight is zero: snapshot is empty or every basis balance is zero")]
    ZeroDenominator,

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("invalid account id {key}: {reason}")]
    InvalidAccountKey { key: String, reason: String },

    #[error("amount {amount} for account {key} does not fit in a u128 balance")]
    AmountOverflow { key: String, amount: String },
}
