pub mod fetcher;
pub mod gateway;
pub mod http;
pub mod image_file;
pub mod localizer;

pub use fetcher::{HttpImageFetcher, ImageFetcher};
pub use gateway::{HttpUploadGateway, UploadGateway, UploadResult};
pub use image_file::{ImageFile, UploadedImage, derive_extension, unique_image_name};
pub use localizer::ImageLocalizer;
