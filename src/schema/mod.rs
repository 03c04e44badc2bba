pub mod lexicon;
pub mod params;
pub mod tone;
