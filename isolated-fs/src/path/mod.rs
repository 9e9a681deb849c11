pub mod cracked;
pub mod segments;
pub mod virtual_path;
