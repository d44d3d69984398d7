pub mod beatmap_parser;
pub mod primitive_parser;
