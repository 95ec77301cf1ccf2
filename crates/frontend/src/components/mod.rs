pub mod date_nav;
pub mod info_banner;
pub mod map_view;
