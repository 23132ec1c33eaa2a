pub mod loft;
pub mod query;
pub mod sampling;
pub mod transform;
