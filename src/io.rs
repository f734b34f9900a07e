pub mod pgm;
pub mod hits;
