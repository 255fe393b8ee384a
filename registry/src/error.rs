use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not a minter")]
    NotMinter,

    #[error("Unauthorized: caller may not move token {token_id}")]
    NotOwnerOrApproved { token_id: String },

    #[error("Token already exists: {token_id}")]
    TokenExists { token_id: String },

    #[error("Token not found: {token_id}")]
    TokenNotFound { token_id: String },
}
