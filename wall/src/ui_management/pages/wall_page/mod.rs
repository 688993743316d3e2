mod components;
mod section;
mod wall_page;

pub use self::wall_page::WallPage;
