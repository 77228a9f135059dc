//! N-dimensional homogeneous math for the hypercube viewer
//!
//! ## Core Types
//!
//! - [`HMatrix`] - `(dims+1) x (dims+1)` transform matrix (rotation, scale, translation)
//! - [`NodeMatrix`] - row-wise node storage, transformed by right-multiplication
//!
//! Points carry `dims + 1` components; the last one is the homogeneous scale
//! and is always 1, which is what lets translation be a matrix product.

pub mod matrix;
pub mod nodes;

pub use matrix::HMatrix;
pub use nodes::NodeMatrix;
