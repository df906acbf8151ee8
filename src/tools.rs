pub mod linspace;
pub mod vector;
pub mod waves;
