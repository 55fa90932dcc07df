pub mod header;
pub mod player;
pub mod segment_list;
pub mod split_markers;
pub mod status_log;
pub mod thumbnail_grid;
