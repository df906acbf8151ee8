pub mod directional_spectral_wave_data_record;
pub mod parseable_data_record;
pub mod wavedroid_data_record;
pub mod wavedroid_metadata;
