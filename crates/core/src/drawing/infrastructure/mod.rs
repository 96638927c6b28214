pub mod display_list;
pub mod raster_surface;
