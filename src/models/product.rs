use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A catalog record. `id` is the table's hash key; writing a product with
/// an existing id overwrites the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// Raw add-product form input. All three fields arrive as free text and are
/// validated before any store call is made.
#[derive(Debug, Clone, Deserialize)]
pub struct AddProductRequest {
    pub id: String,
    pub name: String,
    pub price: String,
}

impl AddProductRequest {
    /// Validates the form fields and builds the record to store.
    ///
    /// The price is accepted as any number but stored as a whole number;
    /// fractional input is truncated ("9.99" becomes 9). That coercion
    /// matches the upstream catalog and is kept intentionally.
    pub fn validate(&self) -> Result<Product> {
        if self.id.is_empty() || self.name.is_empty() || self.price.is_empty() {
            return Err(AppError::Validation(
                "Please fill all fields.".to_string(),
            ));
        }

        // Emptiness is checked on the raw field; numeric parsing strips
        // surrounding whitespace, so a whitespace-only id or price fails
        // the parse instead. The name is stored verbatim.
        let id: i64 = self.id.trim().parse().map_err(|_| invalid_input())?;
        let price: f64 = self.price.trim().parse().map_err(|_| invalid_input())?;
        if !price.is_finite() {
            return Err(invalid_input());
        }

        Ok(Product {
            id,
            name: self.name.clone(),
            price: price as i64,
        })
    }
}

fn invalid_input() -> AppError {
    AppError::Validation(
        "Invalid input. Ensure that the ID is an integer and the price is a number.".to_string(),
    )
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
