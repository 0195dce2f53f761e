pub mod mini_fabq;
pub mod phq2;
pub mod psfs;
pub mod scales;
