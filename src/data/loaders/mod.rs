// mod.rs - Input file loaders

pub mod blast_xml;
