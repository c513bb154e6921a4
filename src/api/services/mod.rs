pub mod redirect;
pub mod shorten;

pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortenService, shorten_routes};
