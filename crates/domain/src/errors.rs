use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid label template: {0}")]
    InvalidTemplate(String),

    #[error("Name outside all configured prefixes: {0}")]
    RecordNotOwned(String),

    #[error("Undecodable address label in: {0}")]
    InvalidEncodedAddress(String),

    #[error("Failed to encode DNS message: {0}")]
    MessageEncoding(String),
}
