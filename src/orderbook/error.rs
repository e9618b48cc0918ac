//! Order book error types

use std::fmt;

/// Errors that can occur when handing orders to the book
#[derive(Debug)]
pub enum OrderBookError {
    /// Price is not finite or not strictly positive
    InvalidPrice {
        /// Identifier of the rejected order
        order_id: u64,
        /// The offending price
        price: f64,
    },

    /// Quantity is zero
    InvalidQuantity {
        /// Identifier of the rejected order
        order_id: u64,
    },

    /// A snapshot could not be serialized
    SerializationError {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice { order_id, price } => {
                write!(f, "Invalid price for order {}: {}", order_id, price)
            }
            OrderBookError::InvalidQuantity { order_id } => {
                write!(f, "Invalid quantity for order {}: must be positive", order_id)
            }
            OrderBookError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}

impl From<serde_json::Error> for OrderBookError {
    fn from(err: serde_json::Error) -> Self {
        OrderBookError::SerializationError {
            message: err.to_string(),
        }
    }
}
