pub mod aggregator;
pub mod language;
pub mod language_profile;
pub mod normalizer;
pub mod score_result;
pub mod scoring_engine;
pub mod sequence_aligner;
pub mod similarity;
pub mod word_aligner;
pub mod word_scorer;
