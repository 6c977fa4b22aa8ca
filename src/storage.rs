mod xml;

pub use xml::{LoadError, load, save};
