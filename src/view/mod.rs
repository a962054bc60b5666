pub mod upload_renderer;
