mod batch;
mod config;
mod disturbance;
mod export;
mod landing;
mod safety;
