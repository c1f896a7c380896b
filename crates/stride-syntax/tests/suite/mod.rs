mod compilation_units;
mod errors;
mod recorder;
