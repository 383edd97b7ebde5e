use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateSellerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameSellerRequest {
    pub new_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameProductRequest {
    pub new_name: String,
}
