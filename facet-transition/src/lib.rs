pub mod timeline;
pub mod tween;
