pub mod sinogram;
